//! Appeal entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the appeals table.
#[derive(Debug, Clone, FromRow)]
pub struct AppealEntity {
    pub id: Uuid,
    pub gis_id: String,
    pub number: String,
    pub category_id: Uuid,
    pub appeal_text: String,
    pub response_text: Option<String>,
    pub address: Option<String>,
    pub article_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<AppealEntity> for domain::models::Appeal {
    fn from(entity: AppealEntity) -> Self {
        Self {
            id: entity.id,
            gis_id: entity.gis_id,
            number: entity.number,
            category_id: entity.category_id,
            appeal_text: entity.appeal_text,
            response_text: entity.response_text,
            address: entity.address,
            article_id: entity.article_id,
            created_at: entity.created_at,
        }
    }
}

/// Trimmed projection used as a worked example on article pages.
#[derive(Debug, Clone, FromRow)]
pub struct AppealExampleEntity {
    pub appeal_text: String,
    pub response_text: Option<String>,
}

impl From<AppealExampleEntity> for domain::models::AppealExample {
    fn from(entity: AppealExampleEntity) -> Self {
        Self {
            appeal_text: entity.appeal_text,
            response_text: entity.response_text,
        }
    }
}
