//! Show command implementation.

use anyhow::Result;

use super::CommandContext;
use crate::cli::IdArgs;
use crate::format::{IssueDetails, format_issue_details};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or the ID does not
/// resolve to exactly one issue.
pub fn execute(args: &IdArgs, ctx: &CommandContext) -> Result<()> {
    let store = ctx.load_store()?;
    let issue = store.get_issue(&args.id)?;

    if ctx.output.is_json() {
        return ctx.output.json(&IssueDetails::new(&store, issue));
    }

    let lengths = store.unique_prefix_lengths();
    println!(
        "{}",
        format_issue_details(&store, issue, &lengths, ctx.output.use_color())
    );
    Ok(())
}
