//! Search endpoints.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::{ArticleSuggestion, ArticleWithCategory, PopularQuery, SearchSort, SortDirection};
use persistence::repositories::{SearchFilter, SearchHistoryRepository, SearchRepository};
use shared::pagination::{PageParams, Paginated, MAX_PUBLIC_LIMIT};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_search_query;
use crate::response::ok;

/// Minimum query length for autocomplete, in characters not bytes.
const SUGGESTION_MIN_CHARS: usize = 2;
const SUGGESTION_LIMIT: i64 = 5;
const POPULAR_QUERY_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
    pub has_template: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sort = query
        .sort_by
        .as_deref()
        .map(str::parse::<SearchSort>)
        .transpose()
        .map_err(ApiError::Validation)?
        .unwrap_or_default();
    let direction = query
        .sort_order
        .as_deref()
        .map(str::parse::<SortDirection>)
        .transpose()
        .map_err(ApiError::Validation)?
        .unwrap_or_default();

    let q = query
        .q
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let params = PageParams::clamp(query.page, query.limit, MAX_PUBLIC_LIMIT);

    record_search_query(!q.is_empty());

    let filter = SearchFilter {
        query: q.clone(),
        category_id: query.category_id,
        has_template: query.has_template.unwrap_or(false),
        sort,
        direction,
        limit: params.limit,
        offset: params.offset(),
    };

    let (entities, total) = SearchRepository::new(state.pool.clone())
        .search(&filter)
        .await?;
    let items: Vec<ArticleWithCategory> = entities.into_iter().map(Into::into).collect();

    // History is best effort; a failed upsert never fails the search
    if !q.is_empty() {
        if let Err(e) = SearchHistoryRepository::new(state.pool.clone()).record(&q).await {
            tracing::warn!(error = %e, "Failed to record search history");
        }
    }

    Ok(ok(Paginated::new(items, total, params)))
}

pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let q = query.q.as_deref().unwrap_or_default().trim().to_lowercase();
    if q.chars().count() < SUGGESTION_MIN_CHARS {
        return Ok(ok(Vec::<ArticleSuggestion>::new()));
    }

    let items: Vec<ArticleSuggestion> = SearchRepository::new(state.pool.clone())
        .suggestions(&q, SUGGESTION_LIMIT)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ok(items))
}

pub async fn popular_queries(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let items: Vec<PopularQuery> = SearchHistoryRepository::new(state.pool.clone())
        .popular(POPULAR_QUERY_LIMIT)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ok(items))
}
