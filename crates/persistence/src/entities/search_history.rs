//! Search history entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the search_history table.
#[derive(Debug, Clone, FromRow)]
pub struct SearchHistoryEntity {
    pub query: String,
    pub count: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<SearchHistoryEntity> for domain::models::PopularQuery {
    fn from(entity: SearchHistoryEntity) -> Self {
        Self {
            query: entity.query,
            count: entity.count,
        }
    }
}
