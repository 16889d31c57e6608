//! Article entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Article, ArticleSuggestion, ArticleWithCategory, CategoryRef};

/// Joined row for an article with its owning category and author name.
///
/// Category columns are aliased `cat_*` in the SELECT lists to avoid
/// colliding with the article's own `category_id`.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleWithCategoryEntity {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub response_template: Option<String>,
    pub legal_reference: Option<String>,
    pub keywords: Vec<String>,
    pub view_count: i32,
    pub is_published: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cat_id: Uuid,
    pub cat_code: String,
    pub cat_name: String,
    pub cat_slug: String,
    pub cat_icon: Option<String>,
    pub author_name: Option<String>,
}

impl From<ArticleWithCategoryEntity> for ArticleWithCategory {
    fn from(entity: ArticleWithCategoryEntity) -> Self {
        Self {
            article: Article {
                id: entity.id,
                category_id: entity.category_id,
                title: entity.title,
                slug: entity.slug,
                summary: entity.summary,
                content: entity.content,
                response_template: entity.response_template,
                legal_reference: entity.legal_reference,
                keywords: entity.keywords,
                view_count: entity.view_count,
                is_published: entity.is_published,
                author_id: entity.author_id,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            },
            category: CategoryRef {
                id: entity.cat_id,
                code: entity.cat_code,
                name: entity.cat_name,
                slug: entity.cat_slug,
                icon: entity.cat_icon,
            },
            author_name: entity.author_name,
            appeals: None,
        }
    }
}

/// Projection row for the autocomplete endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleSuggestionEntity {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category_name: String,
}

impl From<ArticleSuggestionEntity> for ArticleSuggestion {
    fn from(entity: ArticleSuggestionEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            category_name: entity.category_name,
        }
    }
}
