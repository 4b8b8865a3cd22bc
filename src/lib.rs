//! FileSearch-RS: keyword search over a file catalog
//!
//! Decomposes one user keyword into one contains-query per searchable field,
//! executes the whole set as a single batched round-trip against an
//! Elasticsearch-compatible backend, and merges the non-empty result sets
//! into one ordered document list.

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod results;
pub mod schema;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::SearchError;
pub use model::FileDocument;
pub use schema::{search_fields, FieldDescriptor};
pub use search::Searcher;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
