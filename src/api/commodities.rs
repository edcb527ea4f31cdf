//! Commodity name suggestions.

use axum::{
    extract::{rejection::QueryRejection, Query},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{suggest, DEFAULT_SUGGESTION_LIMIT};
use crate::AppState;

/// Query parameters for the suggestions endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    /// Partial commodity name.
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub data: Vec<&'static str>,
}

/// Create the commodities router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/commodities", get(get_suggestions))
}

/// GET /api/commodities?q=on
async fn get_suggestions(
    query: std::result::Result<Query<SuggestQuery>, QueryRejection>,
) -> Result<Json<SuggestResponse>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let data = suggest(query.q.as_deref().unwrap_or_default(), limit);
    Ok(Json(SuggestResponse { data }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suggestions_handler() {
        let query: SuggestQuery = serde_urlencoded::from_str("q=mill").unwrap();
        let Json(response) = get_suggestions(Ok(Query(query))).await.unwrap();

        assert_eq!(response.data, vec!["Millet", "Pearl Millet"]);
    }

    #[tokio::test]
    async fn test_suggestions_handler_limit() {
        let query: SuggestQuery = serde_urlencoded::from_str("q=a&limit=2").unwrap();
        let Json(response) = get_suggestions(Ok(Query(query))).await.unwrap();

        assert_eq!(response.data.len(), 2);
    }

    #[tokio::test]
    async fn test_suggestions_handler_without_query() {
        let query: SuggestQuery = serde_urlencoded::from_str("").unwrap();
        let Json(response) = get_suggestions(Ok(Query(query))).await.unwrap();

        assert!(response.data.is_empty());
    }
}
