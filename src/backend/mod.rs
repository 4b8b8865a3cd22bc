//! Search backend collaborator
//!
//! The executor stage of the pipeline. Everything that talks to the backend
//! lives behind [`SearchBackend`], the sole I/O boundary of a search call.

mod client;

pub use client::ElasticBackend;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::query::FieldQuery;
use crate::results::ResultSet;

/// Batched query execution against the search backend.
///
/// One logical round-trip carries all queries, and the response preserves
/// positional correspondence: result `i` answers query `i`. A backend-level
/// failure fails the whole batch; retry policy, if any, belongs to the
/// transport, not here.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn multi_search(&self, queries: &[FieldQuery]) -> Result<Vec<ResultSet>, SearchError>;
}
