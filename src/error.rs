//! Error taxonomy for the search pipeline

use thiserror::Error;

/// Errors surfaced by the search pipeline.
///
/// The core does no local recovery or retry; every collaborator failure
/// propagates unchanged to the caller of
/// [`Searcher::search`](crate::search::Searcher::search). A failed search is
/// always an `Err`, never a silently-empty result list, so callers can tell
/// "no matches" from "search failed".
#[derive(Debug, Error)]
pub enum SearchError {
    /// The declared schema is malformed. Fatal at startup, never per-call.
    #[error("schema error: {0}")]
    Schema(String),

    /// The batched backend call failed as a whole. No partial results.
    #[error("search backend unavailable: {0}")]
    BackendUnavailable(#[source] anyhow::Error),

    /// The backend answered with a result-set count that does not match the
    /// query count. Failing here keeps positional correspondence from
    /// silently misaligning.
    #[error("backend returned {actual} result sets for {expected} queries")]
    ContractViolation { expected: usize, actual: usize },
}

impl SearchError {
    /// Wrap a transport or decoding failure as a whole-batch failure.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::BackendUnavailable(err.into())
    }
}
