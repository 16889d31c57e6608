//! Public article endpoints.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::ArticleWithCategory;
use persistence::repositories::{AppealRepository, ArticleRepository};
use shared::pagination::{PageParams, Paginated, MAX_PUBLIC_LIMIT};

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ok;

/// Number of appeal examples attached to an article page.
const APPEAL_EXAMPLE_LIMIT: i64 = 5;
/// Page size of the public listing when the client does not pick one.
const LIST_DEFAULT_LIMIT: i64 = 10;
/// Default and maximum size of the popular/recent shelves.
const SHELF_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ShelfQuery {
    pub limit: Option<i64>,
}

pub async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::clamp(
        query.page,
        query.limit.or(Some(LIST_DEFAULT_LIMIT)),
        MAX_PUBLIC_LIMIT,
    );
    let articles = ArticleRepository::new(state.pool.clone());

    let items: Vec<ArticleWithCategory> = articles
        .list_published(query.category_id, params.limit, params.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = articles.count_published(query.category_id).await?;

    Ok(ok(Paginated::new(items, total, params)))
}

pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<ShelfQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(SHELF_LIMIT).clamp(1, SHELF_LIMIT);
    let items: Vec<ArticleWithCategory> = ArticleRepository::new(state.pool.clone())
        .popular(limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ok(items))
}

pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<ShelfQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(SHELF_LIMIT).clamp(1, SHELF_LIMIT);
    let items: Vec<ArticleWithCategory> = ArticleRepository::new(state.pool.clone())
        .recent(limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ok(items))
}

/// Article page with author name and linked appeal examples. Each view
/// bumps the counter; the response reflects the bumped value.
///
/// Drafts stay out of listings and search but resolve by direct link, so
/// editors can preview them.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let articles = ArticleRepository::new(state.pool.clone());

    let entity = articles
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".into()))?;

    articles.increment_views(entity.id).await?;

    let appeals = AppealRepository::new(state.pool.clone())
        .examples_for_article(entity.id, APPEAL_EXAMPLE_LIMIT)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let mut article = ArticleWithCategory::from(entity);
    article.article.view_count += 1;
    article.appeals = Some(appeals);

    Ok(ok(article))
}
