//! Output formatting for `mint`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! Diagnostics always go to stderr; stdout carries only results.
//!
//! # JSON Output Types
//!
//! - [`IssueView`] - Issue with readiness and unique-prefix length (list/ready)
//! - [`IssueDetails`] - Issue with resolved neighbours (show)
//! - [`PrefixChange`] - Old→new ID map (prefix)
//! - [`Statistics`] - Aggregate counts (stats)

mod output;
mod text;

pub use output::{IssueDetails, IssueRef, IssueView, OutputContext, PrefixChange, Statistics};
pub use text::{format_id, format_issue_details, format_issue_line, format_status_icon, icons};
