//! Comment command implementation.

use anyhow::Result;

use super::CommandContext;
use crate::cli::CommentArgs;

/// Execute the comment command.
///
/// Blank text adds nothing and leaves the document untouched.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the document cannot be
/// saved.
pub fn execute(args: &CommentArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.load_store()?;
    let text = args.text.trim();

    if text.is_empty() {
        let issue = store.get_issue(&args.id)?;
        tracing::debug!(id = %issue.id, "Blank comment ignored");
        if ctx.output.is_json() {
            return ctx.output.json(issue);
        }
        println!("No comment added.");
        return Ok(());
    }

    let issue = store.add_comment(&args.id, text)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        return ctx.output.json(&issue);
    }
    let lengths = store.unique_prefix_lengths();
    println!(
        "Commented on {} ({} comment(s))",
        ctx.id(&issue.id, &lengths),
        issue.comments.len()
    );
    Ok(())
}
