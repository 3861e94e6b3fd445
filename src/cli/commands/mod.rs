//! Command implementations.
//!
//! Each command loads the store through [`CommandContext`], applies at most
//! one store operation, and saves only when that operation succeeded.

pub mod close;
pub mod comment;
pub mod completions;
pub mod create;
pub mod delete;
pub mod dep;
pub mod doctor;
pub mod edit;
pub mod init;
pub mod list;
pub mod prefix;
pub mod ready;
pub mod show;
pub mod stats;
pub mod version;

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use mint_lib::{Issue, Store};

use crate::config::Config;
use crate::format::{IssueView, OutputContext, format_id, format_issue_line};

/// Resolved configuration plus output settings shared by every command.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub output: OutputContext,
}

impl CommandContext {
    #[must_use]
    pub const fn new(config: Config, output: OutputContext) -> Self {
        Self { config, output }
    }

    /// Load the configured document (empty store if it does not exist).
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn load_store(&self) -> Result<Store> {
        let path = &self.config.document;
        Store::load(path, &self.config.prefix)
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Save `store` back to the configured document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_store(&self, store: &Store) -> Result<()> {
        let path = &self.config.document;
        store
            .save_to(path)
            .with_context(|| format!("saving {}", path.display()))
    }

    /// Render an ID with its unique prefix emphasised.
    #[must_use]
    pub fn id(&self, id: &str, lengths: &HashMap<String, usize>) -> String {
        format_id(id, unique_len(lengths, id), self.output.use_color())
    }

    /// Print issues as one line each (or JSON), followed by a count.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON output fails.
    pub fn print_issue_list(&self, store: &Store, issues: &[&Issue], empty: &str) -> Result<()> {
        let lengths = store.unique_prefix_lengths();

        if self.output.is_json() {
            let views: Vec<IssueView<'_>> = issues
                .iter()
                .map(|issue| IssueView::new(store, issue, unique_len(&lengths, &issue.id)))
                .collect();
            return self.output.json(&views);
        }

        if issues.is_empty() {
            println!("{empty}");
            return Ok(());
        }
        for issue in issues {
            println!(
                "{}",
                format_issue_line(
                    issue,
                    unique_len(&lengths, &issue.id),
                    self.output.use_color()
                )
            );
        }
        println!("\n{} issue(s)", issues.len());
        Ok(())
    }
}

fn unique_len(lengths: &HashMap<String, usize>, id: &str) -> usize {
    lengths.get(id).copied().unwrap_or(id.len())
}

/// Reject blank titles.
///
/// # Errors
///
/// Returns an error if `title` is empty or whitespace.
pub fn require_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        bail!("title cannot be empty");
    }
    Ok(title)
}
