//! Close and reopen command implementations.

use anyhow::Result;

use super::CommandContext;
use crate::cli::{CloseArgs, IdArgs};

/// Execute the close command.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the document cannot be
/// saved.
pub fn execute_close(args: &CloseArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.load_store()?;
    let issue = store.close_issue(&args.id, args.reason.as_deref().unwrap_or(""))?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        return ctx.output.json(&issue);
    }
    let lengths = store.unique_prefix_lengths();
    println!("Closed {}: {}", ctx.id(&issue.id, &lengths), issue.title);

    let unblocked: Vec<String> = issue
        .blocks
        .iter()
        .filter(|id| store.is_ready(id).unwrap_or(false))
        .map(|id| ctx.id(id, &lengths))
        .collect();
    if !unblocked.is_empty() {
        println!("Now ready: {}", unblocked.join(", "));
    }
    Ok(())
}

/// Execute the reopen command.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the document cannot be
/// saved.
pub fn execute_reopen(args: &IdArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.load_store()?;
    let issue = store.reopen_issue(&args.id)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        return ctx.output.json(&issue);
    }
    let lengths = store.unique_prefix_lengths();
    println!("Reopened {}: {}", ctx.id(&issue.id, &lengths), issue.title);
    Ok(())
}
