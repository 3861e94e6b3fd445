//! Dependency command implementations.

use anyhow::Result;
use mint_lib::Store;
use serde::Serialize;

use super::CommandContext;
use crate::cli::{DepArgs, DepSubcommand};

#[derive(Serialize)]
struct DepChange {
    action: &'static str,
    issue: String,
    depends_on: String,
}

/// Execute a `dep` subcommand.
///
/// # Errors
///
/// Returns an error if either ID does not resolve, the link is invalid
/// (self, duplicate, or missing for removal), or the document cannot be
/// saved.
pub fn execute(command: &DepSubcommand, ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.load_store()?;

    let (action, args) = match command {
        DepSubcommand::Add(args) => {
            if args.blocks {
                store.link_blocks(&args.issue, &args.target)?;
            } else {
                store.link_depends_on(&args.issue, &args.target)?;
            }
            ("added", args)
        }
        DepSubcommand::Remove(args) => {
            if args.blocks {
                store.unlink_blocks(&args.issue, &args.target)?;
            } else {
                store.unlink_depends_on(&args.issue, &args.target)?;
            }
            ("removed", args)
        }
    };
    ctx.save_store(&store)?;

    let (dependent, dependency) = edge(&store, args)?;
    if ctx.output.is_json() {
        return ctx.output.json(&DepChange {
            action,
            issue: dependent,
            depends_on: dependency,
        });
    }

    let lengths = store.unique_prefix_lengths();
    let verb = if action == "added" {
        "now depends on"
    } else {
        "no longer depends on"
    };
    println!(
        "{} {verb} {}",
        ctx.id(&dependent, &lengths),
        ctx.id(&dependency, &lengths)
    );
    Ok(())
}

/// Full IDs of the edge as (dependent, dependency).
fn edge(store: &Store, args: &DepArgs) -> Result<(String, String)> {
    let issue = store.resolve_id(&args.issue)?;
    let target = store.resolve_id(&args.target)?;
    Ok(if args.blocks {
        (target, issue)
    } else {
        (issue, target)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mint_lib::IdSource;

    struct Fixed(Vec<&'static str>);

    impl IdSource for Fixed {
        fn next_id(&mut self, _prefix: &str, _count: usize) -> mint_lib::Result<String> {
            Ok(self.0.remove(0).to_string())
        }
    }

    #[test]
    fn test_edge_orientation() {
        let mut store = Store::new("mint");
        let mut ids = Fixed(vec!["mint-abc", "mint-xyz"]);
        store.create_issue_with("A", &mut ids).unwrap();
        store.create_issue_with("B", &mut ids).unwrap();

        let args = DepArgs {
            issue: "mint-a".into(),
            target: "mint-x".into(),
            blocks: false,
        };
        assert_eq!(
            edge(&store, &args).unwrap(),
            ("mint-abc".to_string(), "mint-xyz".to_string())
        );

        let blocks = DepArgs {
            blocks: true,
            ..args
        };
        assert_eq!(
            edge(&store, &blocks).unwrap(),
            ("mint-xyz".to_string(), "mint-abc".to_string())
        );
    }
}
