//! Public category catalog endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use domain::models::{ArticleWithCategory, Category, CategoryDetail};
use persistence::repositories::{ArticleRepository, CategoryRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ok;

/// Root categories with children and published-article counts.
pub async fn list_tree(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tree = CategoryRepository::new(state.pool.clone()).list_tree().await?;
    Ok(ok(tree))
}

/// Category page: the category, its relations, and its published articles.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = CategoryRepository::new(state.pool.clone());

    let category = categories
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;

    let children: Vec<Category> = categories
        .children_of(category.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let parent = match category.parent_id {
        Some(parent_id) => categories.find_by_id(parent_id).await?.map(Category::from),
        None => None,
    };

    let articles: Vec<ArticleWithCategory> = ArticleRepository::new(state.pool.clone())
        .list_published_for_category(category.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ok(CategoryDetail {
        category: category.into(),
        children,
        parent,
        articles,
    }))
}
