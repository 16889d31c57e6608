//! Category entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the categories table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntity {
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

impl From<CategoryEntity> for domain::models::Category {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            icon: entity.icon,
            parent_id: entity.parent_id,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Category row annotated with an article count aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryWithCountEntity {
    #[sqlx(flatten)]
    pub category: CategoryEntity,
    pub article_count: i64,
}
