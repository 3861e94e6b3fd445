//! Delete command implementation.

use anyhow::Result;

use super::CommandContext;
use crate::cli::IdArgs;

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the document cannot be
/// saved.
pub fn execute(args: &IdArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.load_store()?;
    let removed = store.delete_issue(&args.id)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        return ctx.output.json(&removed);
    }
    let detached = removed.depends_on.len() + removed.blocks.len();
    println!("Deleted {}: {}", removed.id, removed.title);
    if detached > 0 {
        println!("Removed {detached} dependency link(s)");
    }
    Ok(())
}
