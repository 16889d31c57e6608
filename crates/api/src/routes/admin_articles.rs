//! Admin article management endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use domain::models::ArticleWithCategory;
use persistence::repositories::{
    ArticleRepository, CategoryRepository, NewArticle, UpdateArticle,
};
use shared::pagination::{PageParams, Paginated, MAX_ADMIN_LIMIT};
use shared::slug::unique_slug;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::response::ok;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 500, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Summary is required"))]
    pub summary: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub response_template: Option<String>,
    pub legal_reference: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 500, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub response_template: Option<String>,
    pub legal_reference: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// All articles including drafts, for the admin listing.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = PageParams::clamp(query.page, query.limit, MAX_ADMIN_LIMIT);
    let articles = ArticleRepository::new(state.pool.clone());

    let items: Vec<ArticleWithCategory> = articles
        .list_all(params.limit, params.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = articles.count_all().await?;

    Ok(ok(Paginated::new(items, total, params)))
}

/// Create an article. The slug is derived from the title with a timestamp
/// suffix, so repeated titles never collide.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    if CategoryRepository::new(state.pool.clone())
        .find_by_id(req.category_id)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation("Unknown category".into()));
    }

    let slug = unique_slug(&req.title, Utc::now().timestamp_millis());

    let created: ArticleWithCategory = ArticleRepository::new(state.pool.clone())
        .create(NewArticle {
            category_id: req.category_id,
            title: req.title,
            slug,
            summary: req.summary,
            content: req.content,
            response_template: req.response_template,
            legal_reference: req.legal_reference,
            keywords: req.keywords,
            is_published: req.is_published,
            author_id: user.user_id,
        })
        .await?
        .into();

    Ok((StatusCode::CREATED, ok(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    if let Some(category_id) = req.category_id {
        if CategoryRepository::new(state.pool.clone())
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(ApiError::Validation("Unknown category".into()));
        }
    }

    let updated = ArticleRepository::new(state.pool.clone())
        .update(
            id,
            UpdateArticle {
                category_id: req.category_id,
                title: req.title,
                summary: req.summary,
                content: req.content,
                response_template: req.response_template,
                legal_reference: req.legal_reference,
                keywords: req.keywords,
                is_published: req.is_published,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Article not found".into()))?;

    Ok(ok(ArticleWithCategory::from(updated)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = ArticleRepository::new(state.pool.clone()).delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Article not found".into()));
    }
    Ok(ok(json!({ "deleted": true })))
}
