//! Category taxonomy domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::article::ArticleWithCategory;

/// A node in the two-level topic taxonomy.
///
/// `code` is the human-meaningful dotted taxonomy code from the external
/// appeal system (e.g. "12.14").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A root category annotated with its children and published-article count,
/// as returned by the public category tree endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
    pub article_count: i64,
}

/// Full category page: the category, its relations, and its published
/// articles ordered most-recently-updated first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
    pub parent: Option<Category>,
    pub articles: Vec<ArticleWithCategory>,
}
