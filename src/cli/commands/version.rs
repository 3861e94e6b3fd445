//! Version command implementation.

use anyhow::Result;
use serde::Serialize;

use crate::format::OutputContext;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
}

const fn build_kind() -> &'static str {
    if cfg!(debug_assertions) { "dev" } else { "release" }
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &OutputContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = build_kind();

    if ctx.is_json() {
        return ctx.json(&VersionOutput { version, build });
    }

    println!("mint version {version} ({build})");
    Ok(())
}
