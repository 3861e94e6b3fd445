//! Issue collection with mirrored dependency edges.
//!
//! An edge "A depends on B" is stored twice: `B` in `A.depends_on` and `A` in
//! `B.blocks`. Every edge mutation in this module writes both lists or
//! neither; nothing outside the crate gets mutable access to an issue.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{MintError, Result};
use crate::model::Issue;

/// A reference that breaks edge symmetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// `issue` lists `target` but no such issue exists.
    Dangling {
        issue: String,
        target: String,
        field: EdgeField,
    },
    /// `issue` lists `target` but `target` does not list `issue` back.
    OneSided {
        issue: String,
        target: String,
        field: EdgeField,
    },
}

/// Which edge list a reference lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeField {
    DependsOn,
    Blocks,
}

impl EdgeField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DependsOn => "depends_on",
            Self::Blocks => "blocks",
        }
    }
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dangling {
                issue,
                target,
                field,
            } => write!(f, "{issue}.{} references missing {target}", field.as_str()),
            Self::OneSided {
                issue,
                target,
                field,
            } => write!(
                f,
                "{issue}.{} lists {target} without a mirror entry",
                field.as_str()
            ),
        }
    }
}

/// In-memory issue graph keyed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueGraph {
    issues: HashMap<String, Issue>,
}

impl IssueGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from issues, rejecting duplicate IDs.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if two issues share an ID.
    pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Result<Self> {
        let mut graph = Self::new();
        for issue in issues {
            if graph.issues.contains_key(&issue.id) {
                return Err(MintError::IdCollision { id: issue.id });
            }
            graph.issues.insert(issue.id.clone(), issue);
        }
        Ok(graph)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.issues.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.get(id)
    }

    /// All IDs, unordered.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.issues.keys().map(String::as_str)
    }

    /// All issues sorted by ID.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Issue> {
        let mut issues: Vec<&Issue> = self.issues.values().collect();
        issues.sort_by(|a, b| a.id.cmp(&b.id));
        issues
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.issues.get_mut(id)
    }

    /// Insert an issue with no edges. The caller guarantees the ID is free.
    pub(crate) fn insert(&mut self, mut issue: Issue) {
        issue.depends_on.clear();
        issue.blocks.clear();
        self.issues.insert(issue.id.clone(), issue);
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Record "`dependent` depends on `dependency`" on both endpoints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if either endpoint is missing,
    /// `SelfDependency`, or `DuplicateLink`. Nothing is recorded on error.
    pub(crate) fn link(
        &mut self,
        dependent: &str,
        dependency: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.check_endpoints(dependent, dependency)?;
        if self.has_edge(dependent, dependency) {
            return Err(MintError::DuplicateLink {
                dependent: dependent.to_string(),
                dependency: dependency.to_string(),
            });
        }

        if let Some(issue) = self.issues.get_mut(dependent) {
            issue.depends_on.push(dependency.to_string());
            issue.touch(now);
        }
        if let Some(issue) = self.issues.get_mut(dependency) {
            issue.blocks.push(dependent.to_string());
            issue.touch(now);
        }

        tracing::debug!(dependent, dependency, "Linked");
        Ok(())
    }

    /// Remove one "`dependent` depends on `dependency`" edge from both
    /// endpoints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if either endpoint is missing, or
    /// `NotLinked` if the edge is absent on either side.
    pub(crate) fn unlink(
        &mut self,
        dependent: &str,
        dependency: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.check_endpoints(dependent, dependency)?;

        let forward = self.issues[dependent]
            .depends_on
            .iter()
            .position(|id| id == dependency);
        let backward = self.issues[dependency]
            .blocks
            .iter()
            .position(|id| id == dependent);
        let (Some(forward), Some(backward)) = (forward, backward) else {
            return Err(MintError::NotLinked {
                dependent: dependent.to_string(),
                dependency: dependency.to_string(),
            });
        };

        if let Some(issue) = self.issues.get_mut(dependent) {
            issue.depends_on.remove(forward);
            issue.touch(now);
        }
        if let Some(issue) = self.issues.get_mut(dependency) {
            issue.blocks.remove(backward);
            issue.touch(now);
        }

        tracing::debug!(dependent, dependency, "Unlinked");
        Ok(())
    }

    /// Remove an issue and every reference to it held by its peers.
    pub(crate) fn remove(&mut self, id: &str, now: DateTime<Utc>) -> Option<Issue> {
        let removed = self.issues.remove(id)?;

        for peer in &removed.blocks {
            if let Some(issue) = self.issues.get_mut(peer) {
                issue.depends_on.retain(|dep| dep != id);
                issue.touch(now);
            }
        }
        for peer in &removed.depends_on {
            if let Some(issue) = self.issues.get_mut(peer) {
                issue.blocks.retain(|blocked| blocked != id);
                issue.touch(now);
            }
        }

        Some(removed)
    }

    /// Rewrite every ID and edge through `mapping`, all at once.
    ///
    /// IDs missing from `mapping` keep their value. The caller guarantees the
    /// mapping is injective over the current IDs.
    pub(crate) fn rename(&mut self, mapping: &HashMap<String, String>) {
        let remap = |id: &String| mapping.get(id).cloned().unwrap_or_else(|| id.clone());

        let renamed: HashMap<String, Issue> = std::mem::take(&mut self.issues)
            .into_values()
            .map(|mut issue| {
                issue.id = remap(&issue.id);
                issue.depends_on = issue.depends_on.iter().map(remap).collect();
                issue.blocks = issue.blocks.iter().map(remap).collect();
                (issue.id.clone(), issue)
            })
            .collect();

        self.issues = renamed;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether `dependent` already lists `dependency`.
    #[must_use]
    pub fn has_edge(&self, dependent: &str, dependency: &str) -> bool {
        self.issues
            .get(dependent)
            .is_some_and(|issue| issue.depends_on.iter().any(|id| id == dependency))
    }

    /// An open issue is ready when none of its dependencies is an existing
    /// open issue. Recomputed from current statuses on every call.
    #[must_use]
    pub fn is_ready(&self, issue: &Issue) -> bool {
        issue.is_open() && self.open_blockers(issue).next().is_none()
    }

    /// Dependencies of `issue` that are currently open.
    pub fn open_blockers<'a>(&'a self, issue: &'a Issue) -> impl Iterator<Item = &'a Issue> {
        issue
            .depends_on
            .iter()
            .filter_map(|id| self.issues.get(id))
            .filter(|dep| dep.is_open())
    }

    /// Every dangling or one-sided reference, sorted by issue ID.
    #[must_use]
    pub fn inconsistencies(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();

        for issue in self.sorted() {
            for target in &issue.depends_on {
                match self.issues.get(target) {
                    None => found.push(Inconsistency::Dangling {
                        issue: issue.id.clone(),
                        target: target.clone(),
                        field: EdgeField::DependsOn,
                    }),
                    Some(peer) if !peer.blocks.contains(&issue.id) => {
                        found.push(Inconsistency::OneSided {
                            issue: issue.id.clone(),
                            target: target.clone(),
                            field: EdgeField::DependsOn,
                        });
                    }
                    Some(_) => {}
                }
            }
            for target in &issue.blocks {
                match self.issues.get(target) {
                    None => found.push(Inconsistency::Dangling {
                        issue: issue.id.clone(),
                        target: target.clone(),
                        field: EdgeField::Blocks,
                    }),
                    Some(peer) if !peer.depends_on.contains(&issue.id) => {
                        found.push(Inconsistency::OneSided {
                            issue: issue.id.clone(),
                            target: target.clone(),
                            field: EdgeField::Blocks,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        found
    }

    fn check_endpoints(&self, dependent: &str, dependency: &str) -> Result<()> {
        for id in [dependent, dependency] {
            if !self.issues.contains_key(id) {
                return Err(MintError::InvalidReference { id: id.to_string() });
            }
        }
        if dependent == dependency {
            return Err(MintError::SelfDependency {
                id: dependent.to_string(),
            });
        }
        Ok(())
    }
}
