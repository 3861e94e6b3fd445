//! `mint-lib` — File-backed issue store engine.
//!
//! Issues live in a single YAML document. The store keeps `depends_on` and
//! `blocks` as two mirrored views of one dependency edge set, resolves
//! partial IDs, and renames every issue when the project prefix changes.
//!
//! # Quick Start
//!
//! ```no_run
//! use mint_lib::{ListFilters, Store};
//!
//! // Load existing file (or start empty)
//! let mut store = Store::load(".mint/issues.yaml", "mint").unwrap();
//!
//! // Create and link
//! let parser = store.create_issue("Write parser").unwrap();
//! let lexer = store.create_issue("Write lexer").unwrap();
//! store.link_depends_on(&parser.id, &lexer.id).unwrap();
//!
//! // Query
//! let ready = store.ready_issues();
//! let open = store.list_issues(&ListFilters::open());
//!
//! // Save back
//! store.save_to(".mint/issues.yaml").unwrap();
//! ```

pub mod document;
pub mod error;
pub mod graph;
pub mod id;
pub mod model;
pub mod prefix;
pub mod query;
pub mod store;

pub use error::{MintError, Result};
pub use graph::{EdgeField, Inconsistency, IssueGraph};
pub use id::{IdConfig, IdSource, RandomIdSource};
pub use model::{Issue, Status};
pub use query::{ListFilters, Stats};
pub use store::{DEFAULT_PREFIX, MAX_ID_ATTEMPTS, Store};
