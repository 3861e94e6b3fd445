//! Text formatting functions for `mint`.
//!
//! Provides terminal output for issues:
//! - Status icons (○ ✓)
//! - IDs with the minimal unique prefix emphasised
//! - Issue lines and the detail view used by `show`

use std::collections::HashMap;
use std::fmt::Write as _;

use crossterm::style::Stylize;
use mint_lib::{Issue, Status, Store};

/// Status icon characters.
pub mod icons {
    /// Open issue (hollow circle).
    pub const OPEN: &str = "○";
    /// Closed issue (checkmark).
    pub const CLOSED: &str = "✓";
    /// Referenced ID that no longer exists.
    pub const MISSING: &str = "?";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::Closed => icons::CLOSED,
    }
}

/// Render an ID with its first `unique_len` characters bold and underlined
/// and the remainder dimmed. Plain text when `color` is off.
#[must_use]
pub fn format_id(id: &str, unique_len: usize, color: bool) -> String {
    if !color {
        return id.to_string();
    }
    let split = id
        .char_indices()
        .nth(unique_len)
        .map_or(id.len(), |(idx, _)| idx);
    let (head, tail) = id.split_at(split);
    if tail.is_empty() {
        format!("{}", head.bold().underlined())
    } else {
        format!("{}{}", head.bold().underlined(), tail.dim())
    }
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} {title}`
#[must_use]
pub fn format_issue_line(issue: &Issue, unique_len: usize, color: bool) -> String {
    format!(
        "{} {} {}",
        format_status_icon(issue.status),
        format_id(&issue.id, unique_len, color),
        issue.title,
    )
}

/// Format the multi-line detail view of one issue.
#[must_use]
pub fn format_issue_details(
    store: &Store,
    issue: &Issue,
    lengths: &HashMap<String, usize>,
    color: bool,
) -> String {
    let id_of = |id: &str| format_id(id, lengths.get(id).copied().unwrap_or(id.len()), color);

    let state = match (issue.status, store.graph().is_ready(issue)) {
        (Status::Closed, _) => "closed",
        (Status::Open, true) => "open, ready",
        (Status::Open, false) => "open, blocked",
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        format_status_icon(issue.status),
        id_of(&issue.id),
        issue.title
    );
    let _ = writeln!(out, "Status:  {state}");
    let _ = writeln!(out, "Created: {}", issue.created_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = write!(out, "Updated: {}", issue.updated_at.format("%Y-%m-%d %H:%M UTC"));

    for (label, refs) in [("Depends on", &issue.depends_on), ("Blocks", &issue.blocks)] {
        if refs.is_empty() {
            continue;
        }
        let _ = write!(out, "\n\n{label}:");
        for target in refs {
            match store.graph().get(target) {
                Some(peer) => {
                    let _ = write!(
                        out,
                        "\n  {} {} {}",
                        format_status_icon(peer.status),
                        id_of(&peer.id),
                        peer.title
                    );
                }
                None => {
                    let _ = write!(out, "\n  {} {target} (missing)", icons::MISSING);
                }
            }
        }
    }

    if !issue.comments.is_empty() {
        let _ = write!(out, "\n\nComments:");
        for (n, comment) in issue.comments.iter().enumerate() {
            let _ = write!(out, "\n  {}. {comment}", n + 1);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mint_lib::IdSource;

    struct Fixed(Vec<&'static str>);

    impl IdSource for Fixed {
        fn next_id(&mut self, _prefix: &str, _count: usize) -> mint_lib::Result<String> {
            Ok(self.0.remove(0).to_string())
        }
    }

    fn make_test_issue() -> Issue {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        Issue::new("mint-abc", "Test title", at)
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(format_status_icon(Status::Open), "○");
        assert_eq!(format_status_icon(Status::Closed), "✓");
    }

    #[test]
    fn test_format_id_plain() {
        assert_eq!(format_id("mint-abc", 6, false), "mint-abc");
    }

    #[test]
    fn test_format_id_styled_split() {
        let styled = format_id("mint-abc", 6, true);
        assert!(styled.contains("mint-a"));
        assert!(styled.contains("bc"));
        assert!(!styled.contains("mint-abc"));
        assert!(styled.contains('\u{1b}'));
    }

    #[test]
    fn test_format_id_whole_id_unique() {
        let styled = format_id("ab", 5, true);
        assert!(styled.contains("ab"));
    }

    #[test]
    fn test_format_issue_line_open() {
        insta::assert_snapshot!(
            format_issue_line(&make_test_issue(), 6, false),
            @"○ mint-abc Test title"
        );
    }

    #[test]
    fn test_format_issue_line_closed() {
        let mut issue = make_test_issue();
        issue.status = Status::Closed;
        assert!(format_issue_line(&issue, 6, false).starts_with("✓"));
    }

    #[test]
    fn test_format_issue_details() {
        let mut store = Store::new("mint");
        let mut ids = Fixed(vec!["mint-abc", "mint-xyz"]);
        store.create_issue_with("Parser", &mut ids).unwrap();
        store.create_issue_with("Lexer", &mut ids).unwrap();
        store.link_depends_on("mint-abc", "mint-xyz").unwrap();
        store.add_comment("mint-abc", "needs tokens first").unwrap();

        let mut issue = store.get_issue("mint-abc").unwrap().clone();
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        issue.created_at = at;
        issue.updated_at = at;

        let lengths = store.unique_prefix_lengths();
        insta::assert_snapshot!(format_issue_details(&store, &issue, &lengths, false), @r"
        ○ mint-abc Parser
        Status:  open, blocked
        Created: 2024-01-02 03:04 UTC
        Updated: 2024-01-02 03:04 UTC

        Depends on:
          ○ mint-xyz Lexer

        Comments:
          1. needs tokens first
        ");
    }

    #[test]
    fn test_format_issue_details_missing_reference() {
        let mut issue = make_test_issue();
        issue.blocks.push("mint-gone".into());
        let store = Store::new("mint");
        let text = format_issue_details(&store, &issue, &HashMap::new(), false);
        assert!(text.contains("? mint-gone (missing)"));
    }
}
