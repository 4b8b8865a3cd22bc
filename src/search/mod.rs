//! Search orchestration
//!
//! The three-stage pipeline behind every search call: build the per-field
//! queries (pure), execute them as one batch (the sole I/O boundary), merge
//! the non-empty result sets (pure). Isolating the execute stage keeps the
//! only failure-prone step away from the deterministic ones.

use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::SearchBackend;
use crate::error::SearchError;
use crate::model::FileDocument;
use crate::query::{build_queries, FieldQuery, PageRequest};
use crate::results::{merge, ResultSet};
use crate::schema::{search_fields, FieldDescriptor};

/// Coordinates keyword search across all searchable fields of the catalog.
///
/// The field list is the process-wide registry output; everything else is
/// call-local, so concurrent searches share no mutable state.
pub struct Searcher {
    backend: Arc<dyn SearchBackend>,
    fields: &'static [FieldDescriptor],
}

impl Searcher {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            fields: search_fields(),
        }
    }

    /// Search every field for the keyword and return the merged document
    /// list.
    ///
    /// An empty or whitespace-only keyword short-circuits to an empty result
    /// without touching the backend. The call blocks until the batch
    /// round-trip completes; no timeout is imposed here beyond the
    /// transport's own.
    pub async fn search(
        &self,
        keyword: &str,
        page: &PageRequest,
    ) -> Result<Vec<FileDocument>, SearchError> {
        if keyword.trim().is_empty() {
            return Ok(Vec::new());
        }

        let queries = build_queries(keyword, page, self.fields);

        debug!("Fanning out '{}' across {} fields", keyword, queries.len());

        let result_sets = self.execute_batch(&queries).await?;
        let documents = merge(result_sets);

        info!("Search '{}' matched {} documents", keyword, documents.len());

        Ok(documents)
    }

    /// Run the batch and enforce positional correspondence.
    async fn execute_batch(&self, queries: &[FieldQuery]) -> Result<Vec<ResultSet>, SearchError> {
        let result_sets = self.backend.multi_search(queries).await?;

        if result_sets.len() != queries.len() {
            return Err(SearchError::ContractViolation {
                expected: queries.len(),
                actual: result_sets.len(),
            });
        }

        Ok(result_sets)
    }
}
