//! List command implementation.

use anyhow::Result;
use mint_lib::{ListFilters, Status};

use super::CommandContext;
use crate::cli::ListArgs;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or output fails.
pub fn execute(args: &ListArgs, ctx: &CommandContext) -> Result<()> {
    let store = ctx.load_store()?;
    let filters = build_filters(args);
    let issues = store.list_issues(&filters);
    ctx.print_issue_list(&store, &issues, "No issues found.")
}

/// Convert CLI args to store filters.
fn build_filters(args: &ListArgs) -> ListFilters {
    let status = if args.all {
        None
    } else if args.closed {
        Some(Status::Closed)
    } else {
        Some(Status::Open)
    };

    ListFilters {
        status,
        title_contains: args.search.clone().filter(|s| !s.trim().is_empty()),
        limit: args.limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            all: false,
            closed: false,
            search: None,
            limit: None,
        }
    }

    #[test]
    fn test_build_filters_defaults_to_open() {
        let filters = build_filters(&args());
        assert_eq!(filters.status, Some(Status::Open));
        assert!(filters.title_contains.is_none());
    }

    #[test]
    fn test_build_filters_all_and_closed() {
        let all = build_filters(&ListArgs {
            all: true,
            ..args()
        });
        assert_eq!(all.status, None);

        let closed = build_filters(&ListArgs {
            closed: true,
            ..args()
        });
        assert_eq!(closed.status, Some(Status::Closed));
    }

    #[test]
    fn test_build_filters_ignores_blank_search() {
        let filters = build_filters(&ListArgs {
            search: Some("  ".into()),
            limit: Some(3),
            ..args()
        });
        assert!(filters.title_contains.is_none());
        assert_eq!(filters.limit, Some(3));
    }
}
