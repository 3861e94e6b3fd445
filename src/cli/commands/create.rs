//! Create command implementation.

use anyhow::Result;

use super::{CommandContext, require_title};
use crate::cli::CreateArgs;

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if the title is blank, no free ID could be generated, or
/// the document cannot be saved.
pub fn execute(args: &CreateArgs, ctx: &CommandContext) -> Result<()> {
    let title = require_title(&args.title)?;

    let mut store = ctx.load_store()?;
    let issue = store.create_issue(title)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        return ctx.output.json(&issue);
    }
    let lengths = store.unique_prefix_lengths();
    println!("Created {}: {}", ctx.id(&issue.id, &lengths), issue.title);
    Ok(())
}
