use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use crossterm::tty::IsTty;
use mint_lib::{Issue, Stats, Status, Store};
use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    json: bool,
    color: bool,
}

impl OutputContext {
    /// `color` is honoured only when stdout is a terminal and JSON is off.
    #[must_use]
    pub fn new(json: bool, color: bool) -> Self {
        Self {
            json,
            color: color && !json && std::io::stdout().is_tty(),
        }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    #[must_use]
    pub const fn use_color(&self) -> bool {
        self.color
    }

    /// Print `value` as pretty JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
        Ok(())
    }
}

/// Issue with derived fields for list views.
#[derive(Debug, Clone, Serialize)]
pub struct IssueView<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    pub ready: bool,
    pub unique_prefix_len: usize,
}

impl<'a> IssueView<'a> {
    #[must_use]
    pub fn new(store: &Store, issue: &'a Issue, unique_prefix_len: usize) -> Self {
        Self {
            issue,
            ready: store.graph().is_ready(issue),
            unique_prefix_len,
        }
    }
}

/// Neighbour summary in the detail view. `status` is `None` for a dangling
/// reference.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRef {
    pub id: String,
    pub title: Option<String>,
    pub status: Option<Status>,
}

impl IssueRef {
    #[must_use]
    pub fn lookup(store: &Store, id: &str) -> Self {
        let peer = store.graph().get(id);
        Self {
            id: id.to_string(),
            title: peer.map(|p| p.title.clone()),
            status: peer.map(|p| p.status),
        }
    }
}

/// Issue details with resolved neighbours for `show`.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDetails<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    pub ready: bool,
    pub dependencies: Vec<IssueRef>,
    pub dependents: Vec<IssueRef>,
}

impl<'a> IssueDetails<'a> {
    #[must_use]
    pub fn new(store: &Store, issue: &'a Issue) -> Self {
        Self {
            issue,
            ready: store.graph().is_ready(issue),
            dependencies: issue
                .depends_on
                .iter()
                .map(|id| IssueRef::lookup(store, id))
                .collect(),
            dependents: issue
                .blocks
                .iter()
                .map(|id| IssueRef::lookup(store, id))
                .collect(),
        }
    }
}

/// Result of a prefix rename.
#[derive(Debug, Clone, Serialize)]
pub struct PrefixChange {
    pub old_prefix: String,
    pub new_prefix: String,
    pub renamed: BTreeMap<String, String>,
}

/// Aggregate statistics with the store prefix.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub prefix: String,
    #[serde(flatten)]
    pub counts: Stats,
}
