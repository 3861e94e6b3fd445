//! Error types for `mint-lib`.

use thiserror::Error;

/// Primary error type for store operations.
#[derive(Error, Debug)]
pub enum MintError {
    // === Resolution Errors ===
    /// No issue matches the given full or partial ID.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Partial ID matches more than one issue. `matches` is sorted.
    #[error("Ambiguous ID '{partial}': matches {}", matches.join(", "))]
    AmbiguousId {
        partial: String,
        matches: Vec<String>,
    },

    /// Blank or otherwise unusable ID input.
    #[error("Invalid issue ID: '{id}'")]
    InvalidId { id: String },

    // === Identifier Errors ===
    /// Every generated candidate collided with an existing ID.
    #[error("Could not generate a free issue ID after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// Two issues would end up sharing one ID.
    #[error("Issue ID collision: {id}")]
    IdCollision { id: String },

    /// The operating system random source failed.
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    // === Relationship Errors ===
    /// A link endpoint does not resolve to an existing issue.
    #[error("Invalid reference: {id} does not exist")]
    InvalidReference { id: String },

    /// An issue was linked to itself.
    #[error("Issue cannot depend on itself: {id}")]
    SelfDependency { id: String },

    /// The edge is already recorded.
    #[error("Link already exists: {dependent} depends on {dependency}")]
    DuplicateLink {
        dependent: String,
        dependency: String,
    },

    /// Unlink named an edge that is not recorded.
    #[error("No link: {dependent} does not depend on {dependency}")]
    NotLinked {
        dependent: String,
        dependency: String,
    },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type using `MintError`.
pub type Result<T> = std::result::Result<T, MintError>;
