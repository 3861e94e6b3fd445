//! Ready and blocked command implementations.

use anyhow::Result;

use super::CommandContext;
use crate::cli::ReadyArgs;

/// Execute the ready command: open issues with no open dependency.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or output fails.
pub fn execute(args: &ReadyArgs, ctx: &CommandContext) -> Result<()> {
    let store = ctx.load_store()?;
    let mut issues = store.ready_issues();
    if let Some(limit) = args.limit {
        issues.truncate(limit);
    }
    ctx.print_issue_list(&store, &issues, "No ready issues.")
}

/// Execute the blocked command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or output fails.
pub fn execute_blocked(args: &ReadyArgs, ctx: &CommandContext) -> Result<()> {
    let store = ctx.load_store()?;
    let mut issues = store.blocked_issues();
    if let Some(limit) = args.limit {
        issues.truncate(limit);
    }
    ctx.print_issue_list(&store, &issues, "No blocked issues.")
}
