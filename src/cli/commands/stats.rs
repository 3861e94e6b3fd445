//! Stats command implementation.

use anyhow::Result;

use super::CommandContext;
use crate::format::Statistics;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or output fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let store = ctx.load_store()?;
    let stats = Statistics {
        prefix: store.prefix().to_string(),
        counts: store.stats(),
    };

    if ctx.output.is_json() {
        return ctx.output.json(&stats);
    }

    let counts = stats.counts;
    println!("Total:   {}", counts.total);
    println!("Open:    {}", counts.open);
    println!("  Ready:   {}", counts.ready);
    println!("  Blocked: {}", counts.blocked);
    println!("Closed:  {}", counts.closed);
    Ok(())
}
