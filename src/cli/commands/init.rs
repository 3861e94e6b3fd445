//! Init command implementation.

use std::fs;

use anyhow::{Context, Result, bail};
use mint_lib::Store;
use serde::Serialize;

use super::CommandContext;
use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE, ConfigLayer, project_dir};

const CONFIG_HINTS: &str = "# color: true\n# log: warn\n";

#[derive(Serialize)]
struct InitOutput<'a> {
    document: String,
    prefix: &'a str,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if a document already exists (without `--force`) or the
/// workspace files cannot be written.
pub fn execute(args: &InitArgs, ctx: &CommandContext) -> Result<()> {
    let document = &ctx.config.document;
    if ctx.config.document_found && !args.force {
        bail!(
            "already initialized at {} (use --force to start over)",
            document.display()
        );
    }

    let prefix = args.prefix.as_deref().unwrap_or(&ctx.config.prefix);
    let store = Store::new(prefix);
    ctx.save_store(&store)?;

    // Config template
    let config_path = project_dir(document).join(CONFIG_FILE);
    if !config_path.exists() {
        let layer = ConfigLayer {
            prefix: Some(store.prefix().to_string()),
            ..ConfigLayer::default()
        };
        let template = format!(
            "# mint project configuration\n{}{CONFIG_HINTS}",
            layer.to_yaml()?
        );
        fs::write(&config_path, template)
            .with_context(|| format!("writing {}", config_path.display()))?;
    }

    tracing::info!(document = %document.display(), prefix = store.prefix(), "Initialized workspace");

    if ctx.output.is_json() {
        return ctx.output.json(&InitOutput {
            document: document.display().to_string(),
            prefix: store.prefix(),
        });
    }
    println!(
        "Initialized mint workspace in {} (prefix: {})",
        project_dir(document).display(),
        display_prefix(store.prefix())
    );
    Ok(())
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() { "<none>" } else { prefix }
}
