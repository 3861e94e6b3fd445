//! Edit command implementation.

use anyhow::Result;

use super::{CommandContext, require_title};
use crate::cli::EditArgs;

/// Execute the edit command.
///
/// # Errors
///
/// Returns an error if the title is blank, the ID does not resolve, or the
/// document cannot be saved.
pub fn execute(args: &EditArgs, ctx: &CommandContext) -> Result<()> {
    let title = require_title(&args.title)?;

    let mut store = ctx.load_store()?;
    let issue = store.update_title(&args.id, title)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        return ctx.output.json(&issue);
    }
    let lengths = store.unique_prefix_lengths();
    println!("Updated {}: {}", ctx.id(&issue.id, &lengths), issue.title);
    Ok(())
}
