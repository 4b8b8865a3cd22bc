//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::model::FileDocument;
use crate::query::{PageRequest, SortSpec, DEFAULT_PAGE_SIZE};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search keyword
    pub q: Option<String>,
    /// Result offset
    pub offset: Option<u64>,
    /// Page size
    pub limit: Option<u64>,
    /// Sort, as `field:asc` or `field:desc`
    pub sort: Option<String>,
}

/// Search response body
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<FileDocument>,
}

/// Search handler
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    // A missing or blank keyword is a valid request with an empty result
    let keyword = params.q.unwrap_or_default();

    let mut page = PageRequest::new(
        params.offset.unwrap_or(0),
        params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    if let Some(sort) = params.sort.as_deref().and_then(SortSpec::parse) {
        page = page.with_sort(sort);
    }

    match state.searcher.search(&keyword, &page).await {
        Ok(results) => Json(SearchResponse {
            query: keyword,
            count: results.len(),
            results,
        })
        .into_response(),
        Err(err) => {
            error!("Search failed: {}", err);
            error_response(&err)
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

fn error_response(err: &SearchError) -> Response {
    let status = match err {
        SearchError::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SearchError::BackendUnavailable(_) | SearchError::ContractViolation { .. } => {
            StatusCode::BAD_GATEWAY
        }
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
