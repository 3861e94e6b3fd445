//! Logging setup for the `mint` binary.
//!
//! Diagnostics go to stderr so that stdout stays clean for `--json` output.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Pick the default filter directive from verbosity flags.
///
/// `-q` wins over `-v`. A configured directive replaces the `warn` default
/// but not an explicit flag.
#[must_use]
pub fn default_directive(verbose: u8, quiet: bool, configured: Option<&str>) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.unwrap_or("warn").to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over every flag.
///
/// # Errors
///
/// Returns an error if the directive does not parse or a subscriber is
/// already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    configured: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)?,
        _ => EnvFilter::try_new(default_directive(verbose, quiet, configured))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .without_time()
        .try_init()
}

/// Route `tracing` output through the test harness's captured writer.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}
