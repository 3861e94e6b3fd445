//! Prefix command implementation.

use anyhow::Result;
use serde::Serialize;

use super::CommandContext;
use crate::cli::PrefixArgs;
use crate::format::PrefixChange;

#[derive(Serialize)]
struct PrefixOutput<'a> {
    prefix: &'a str,
    issues: usize,
}

/// Execute the prefix command: show the prefix, or rename every issue.
///
/// # Errors
///
/// Returns an error if the rename would make two IDs collide or the document
/// cannot be saved.
pub fn execute(args: &PrefixArgs, ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.load_store()?;

    let Some(new_prefix) = args.new_prefix.as_deref() else {
        if ctx.output.is_json() {
            return ctx.output.json(&PrefixOutput {
                prefix: store.prefix(),
                issues: store.len(),
            });
        }
        println!("{}", store.prefix());
        return Ok(());
    };

    let old_prefix = store.prefix().to_string();
    let renamed = store.set_prefix(new_prefix)?;
    ctx.save_store(&store)?;

    let change = PrefixChange {
        old_prefix,
        new_prefix: store.prefix().to_string(),
        renamed: renamed.into_iter().collect(),
    };
    if ctx.output.is_json() {
        return ctx.output.json(&change);
    }

    println!(
        "Renamed {} issue(s): {:?} -> {:?}",
        change.renamed.len(),
        change.old_prefix,
        change.new_prefix
    );
    for (old, new) in &change.renamed {
        println!("  {old} -> {new}");
    }
    Ok(())
}
