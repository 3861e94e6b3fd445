//! Query and summary types for store reads.

use serde::Serialize;

use crate::model::Status;

/// Filter options for listing issues.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    /// Only issues with this status; `None` means every status.
    pub status: Option<Status>,
    /// Case-insensitive title substring.
    pub title_contains: Option<String>,
    pub limit: Option<usize>,
}

impl ListFilters {
    /// Open issues only.
    #[must_use]
    pub fn open() -> Self {
        Self {
            status: Some(Status::Open),
            ..Self::default()
        }
    }
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    /// Open issues with no open dependency.
    pub ready: usize,
    /// Open issues waiting on at least one open dependency.
    pub blocked: usize,
}
