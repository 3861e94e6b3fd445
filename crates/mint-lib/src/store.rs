//! Issue store: the aggregate root over the issue graph.
//!
//! Every public operation accepts full or partial IDs, resolves them first,
//! and either applies completely or returns an error with the store untouched.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::Utc;

use crate::document;
use crate::error::{MintError, Result};
use crate::graph::{Inconsistency, IssueGraph};
use crate::id::{self, IdSource, RandomIdSource};
use crate::model::{Issue, Status};
use crate::prefix;
use crate::query::{ListFilters, Stats};

/// Prefix used when nothing else is configured.
pub const DEFAULT_PREFIX: &str = "mint";

/// Candidate IDs tried by `create_issue` before giving up.
pub const MAX_ID_ATTEMPTS: usize = 10;

/// In-memory issue store.
///
/// Use [`Store::load`] to read a document and [`Store::save_to`] to write it
/// back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    prefix: String,
    graph: IssueGraph,
}

impl Store {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create an empty store.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: id::normalize_prefix(prefix).to_string(),
            graph: IssueGraph::new(),
        }
    }

    /// Assemble a store from already-persisted issues.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if two issues share an ID.
    pub fn from_parts(prefix: &str, issues: Vec<Issue>) -> Result<Self> {
        Ok(Self {
            prefix: id::normalize_prefix(prefix).to_string(),
            graph: IssueGraph::from_issues(issues)?,
        })
    }

    /// Load the document at `path`; a missing file gives an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Yaml` if the document cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>, default_prefix: &str) -> Result<Self> {
        document::load(path.as_ref(), default_prefix)
    }

    /// Save to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Yaml` on failure.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        document::save(self, path.as_ref())
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn graph(&self) -> &IssueGraph {
        &self.graph
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create an open issue with a fresh random ID.
    ///
    /// # Errors
    ///
    /// Returns `ExhaustedRetries` or `RandomSource`.
    pub fn create_issue(&mut self, title: &str) -> Result<Issue> {
        self.create_issue_with(title, &mut RandomIdSource::default())
    }

    /// Create an open issue, drawing candidate IDs from `ids`.
    ///
    /// Tries at most [`MAX_ID_ATTEMPTS`] candidates.
    ///
    /// # Errors
    ///
    /// Returns `ExhaustedRetries` if every candidate collides, or whatever
    /// error the source reports.
    pub fn create_issue_with(&mut self, title: &str, ids: &mut impl IdSource) -> Result<Issue> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = ids.next_id(&self.prefix, self.graph.len())?;
            if self.graph.contains(&candidate) {
                tracing::debug!(%candidate, attempt, "Generated ID collided, retrying");
                continue;
            }

            let issue = Issue::new(candidate, title, Utc::now());
            self.graph.insert(issue.clone());
            tracing::debug!(id = %issue.id, "Created issue");
            return Ok(issue);
        }

        Err(MintError::ExhaustedRetries {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Resolve a full or partial ID to a full ID.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound`, `AmbiguousId`, or `InvalidId`.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        prefix::resolve_partial_id(input, self.graph.ids())
    }

    /// Look up an issue by full or partial ID.
    ///
    /// # Errors
    ///
    /// Same as [`Store::resolve_id`].
    pub fn get_issue(&self, input: &str) -> Result<&Issue> {
        let id = self.resolve_id(input)?;
        self.graph
            .get(&id)
            .ok_or(MintError::IssueNotFound { id })
    }

    /// Replace an issue's title.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn update_title(&mut self, input: &str, title: &str) -> Result<Issue> {
        self.modify(input, |issue| title.clone_into(&mut issue.title))
    }

    /// Append a comment.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn add_comment(&mut self, input: &str, text: &str) -> Result<Issue> {
        self.modify(input, |issue| issue.comments.push(text.to_string()))
    }

    /// Close an issue; a non-blank `reason` is recorded verbatim as a comment.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn close_issue(&mut self, input: &str, reason: &str) -> Result<Issue> {
        self.modify(input, |issue| {
            issue.status = Status::Closed;
            if !reason.trim().is_empty() {
                issue.comments.push(format!("Closed with reason: {reason}"));
            }
        })
    }

    /// Reopen an issue.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn reopen_issue(&mut self, input: &str) -> Result<Issue> {
        self.modify(input, |issue| issue.status = Status::Open)
    }

    /// Delete an issue and every reference to it; returns the removed issue.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn delete_issue(&mut self, input: &str) -> Result<Issue> {
        let id = self.resolve_id(input)?;
        let removed = self
            .graph
            .remove(&id, Utc::now())
            .ok_or_else(|| MintError::IssueNotFound { id: id.clone() })?;
        tracing::debug!(%id, "Deleted issue");
        Ok(removed)
    }

    // ========================================================================
    // Dependencies
    // ========================================================================

    /// Record "`issue` depends on `dependency`".
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference`, `AmbiguousId`, `SelfDependency`, or
    /// `DuplicateLink`.
    pub fn link_depends_on(&mut self, issue: &str, dependency: &str) -> Result<()> {
        let (issue, dependency) = self.resolve_endpoints(issue, dependency)?;
        self.graph.link(&issue, &dependency, Utc::now())
    }

    /// Record "`issue` blocks `blocked`", the same edge as "`blocked`
    /// depends on `issue`".
    ///
    /// # Errors
    ///
    /// Same as [`Store::link_depends_on`].
    pub fn link_blocks(&mut self, issue: &str, blocked: &str) -> Result<()> {
        let (issue, blocked) = self.resolve_endpoints(issue, blocked)?;
        self.graph.link(&blocked, &issue, Utc::now())
    }

    /// Remove "`issue` depends on `dependency`".
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference`, `AmbiguousId`, or `NotLinked`.
    pub fn unlink_depends_on(&mut self, issue: &str, dependency: &str) -> Result<()> {
        let (issue, dependency) = self.resolve_endpoints(issue, dependency)?;
        self.graph.unlink(&issue, &dependency, Utc::now())
    }

    /// Remove "`issue` blocks `blocked`".
    ///
    /// # Errors
    ///
    /// Same as [`Store::unlink_depends_on`].
    pub fn unlink_blocks(&mut self, issue: &str, blocked: &str) -> Result<()> {
        let (issue, blocked) = self.resolve_endpoints(issue, blocked)?;
        self.graph.unlink(&blocked, &issue, Utc::now())
    }

    // ========================================================================
    // Prefix rename
    // ========================================================================

    /// Change the store prefix and rename every issue to match.
    ///
    /// Trailing separators on `new_prefix` are dropped. The old→new mapping is
    /// computed up front and applied to IDs and both edge lists in one pass;
    /// the mapping is returned.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if two issues would receive the same ID, in
    /// which case nothing changes.
    pub fn set_prefix(&mut self, new_prefix: &str) -> Result<HashMap<String, String>> {
        let new_prefix = id::normalize_prefix(new_prefix).to_string();

        let mut old_ids: Vec<&str> = self.graph.ids().collect();
        old_ids.sort_unstable();

        let mut mapping = HashMap::with_capacity(old_ids.len());
        let mut taken = HashSet::with_capacity(old_ids.len());
        for old_id in old_ids {
            let new_id = id::compose_id(&new_prefix, id::id_suffix(old_id, &self.prefix));
            if !taken.insert(new_id.clone()) {
                return Err(MintError::IdCollision { id: new_id });
            }
            mapping.insert(old_id.to_string(), new_id);
        }

        self.graph.rename(&mapping);
        let old_prefix = std::mem::replace(&mut self.prefix, new_prefix);
        tracing::debug!(
            from = %old_prefix,
            to = %self.prefix,
            renamed = mapping.len(),
            "Changed prefix"
        );

        Ok(mapping)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Issues matching `filters`, sorted by ID.
    #[must_use]
    pub fn list_issues(&self, filters: &ListFilters) -> Vec<&Issue> {
        let needle = filters.title_contains.as_ref().map(|s| s.to_lowercase());
        let mut results: Vec<&Issue> = self
            .graph
            .sorted()
            .into_iter()
            .filter(|issue| filters.status.is_none_or(|status| issue.status == status))
            .filter(|issue| {
                needle
                    .as_ref()
                    .is_none_or(|n| issue.title.to_lowercase().contains(n))
            })
            .collect();

        if let Some(limit) = filters.limit {
            results.truncate(limit);
        }
        results
    }

    /// Open issues with no open dependency, sorted by ID.
    #[must_use]
    pub fn ready_issues(&self) -> Vec<&Issue> {
        self.graph
            .sorted()
            .into_iter()
            .filter(|issue| self.graph.is_ready(issue))
            .collect()
    }

    /// Open issues waiting on at least one open dependency, sorted by ID.
    #[must_use]
    pub fn blocked_issues(&self) -> Vec<&Issue> {
        self.graph
            .sorted()
            .into_iter()
            .filter(|issue| issue.is_open() && !self.graph.is_ready(issue))
            .collect()
    }

    /// Whether the issue is ready to work on.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn is_ready(&self, input: &str) -> Result<bool> {
        let issue = self.get_issue(input)?;
        Ok(self.graph.is_ready(issue))
    }

    /// Open dependencies of an issue, sorted by ID.
    ///
    /// # Errors
    ///
    /// Returns resolution errors.
    pub fn open_blockers(&self, input: &str) -> Result<Vec<&Issue>> {
        let issue = self.get_issue(input)?;
        let mut blockers: Vec<&Issue> = self.graph.open_blockers(issue).collect();
        blockers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(blockers)
    }

    /// Minimal unique prefix length of every ID.
    #[must_use]
    pub fn unique_prefix_lengths(&self) -> HashMap<String, usize> {
        prefix::min_unique_prefix_lengths(self.graph.ids())
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            total: self.graph.len(),
            ..Stats::default()
        };
        for issue in self.graph.sorted() {
            if !issue.is_open() {
                stats.closed += 1;
                continue;
            }
            stats.open += 1;
            if self.graph.is_ready(issue) {
                stats.ready += 1;
            } else {
                stats.blocked += 1;
            }
        }
        stats
    }

    /// Dangling and one-sided references (only reachable through a
    /// hand-edited document).
    #[must_use]
    pub fn inconsistencies(&self) -> Vec<Inconsistency> {
        self.graph.inconsistencies()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn modify(&mut self, input: &str, apply: impl FnOnce(&mut Issue)) -> Result<Issue> {
        let id = self.resolve_id(input)?;
        let issue = self
            .graph
            .get_mut(&id)
            .ok_or_else(|| MintError::IssueNotFound { id: id.clone() })?;
        apply(issue);
        issue.touch(Utc::now());
        Ok(issue.clone())
    }

    fn resolve_endpoints(&self, first: &str, second: &str) -> Result<(String, String)> {
        Ok((self.resolve_endpoint(first)?, self.resolve_endpoint(second)?))
    }

    fn resolve_endpoint(&self, input: &str) -> Result<String> {
        self.resolve_id(input).map_err(|err| match err {
            MintError::IssueNotFound { id } => MintError::InvalidReference { id },
            other => other,
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
