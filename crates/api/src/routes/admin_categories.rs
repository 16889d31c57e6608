//! Admin category management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use domain::models::Category;
use persistence::repositories::{CategoryRepository, NewCategory, UpdateCategory};
use shared::slug::slugify;

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ok;

/// Category row with its total article count for the admin listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub article_count: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, max = 300, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Code cannot be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 300, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: Option<i32>,
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items: Vec<CategoryWithCount> = CategoryRepository::new(state.pool.clone())
        .list_all_with_counts()
        .await?
        .into_iter()
        .map(|entity| CategoryWithCount {
            category: entity.category.into(),
            article_count: entity.article_count,
        })
        .collect();
    Ok(ok(items))
}

/// Create a category. The slug comes from the name; codes are unique so a
/// name that transliterates to nothing falls back to the code.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let mut slug = slugify(&req.name);
    if slug.is_empty() {
        slug = slugify(&req.code);
    }

    let created: Category = CategoryRepository::new(state.pool.clone())
        .create(NewCategory {
            code: req.code,
            name: req.name,
            slug,
            description: req.description,
            icon: req.icon,
            parent_id: req.parent_id,
            sort_order: req.sort_order,
        })
        .await?
        .into();

    Ok((StatusCode::CREATED, ok(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    if req.parent_id == Some(id) {
        return Err(ApiError::Validation(
            "Category cannot be its own parent".into(),
        ));
    }

    let updated = CategoryRepository::new(state.pool.clone())
        .update(
            id,
            UpdateCategory {
                code: req.code,
                name: req.name,
                slug: req.slug,
                description: req.description,
                icon: req.icon,
                parent_id: req.parent_id,
                sort_order: req.sort_order,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;

    Ok(ok(Category::from(updated)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = CategoryRepository::new(state.pool.clone()).delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Category not found".into()));
    }
    Ok(ok(json!({ "deleted": true })))
}
