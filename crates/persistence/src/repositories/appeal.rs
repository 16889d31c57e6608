//! Appeal repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AppealEntity, AppealExampleEntity};
use crate::metrics::QueryTimer;

const APPEAL_COLUMNS: &str = "id, gis_id, number, category_id, appeal_text, response_text, address, article_id, created_at";

/// Fields for upserting an appeal by its external id.
#[derive(Debug, Clone)]
pub struct UpsertAppeal {
    pub gis_id: String,
    pub number: String,
    pub category_id: Uuid,
    pub appeal_text: String,
    pub response_text: Option<String>,
    pub address: Option<String>,
}

/// Repository for appeal-related database operations.
#[derive(Clone)]
pub struct AppealRepository {
    pool: PgPool,
}

impl AppealRepository {
    /// Creates a new AppealRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or update an appeal keyed by `gis_id`.
    ///
    /// Re-importing the same spreadsheet refreshes the texts without
    /// creating duplicate rows, which makes the import idempotent.
    pub async fn upsert(&self, appeal: UpsertAppeal) -> Result<AppealEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_appeal");
        let result = sqlx::query_as::<_, AppealEntity>(&format!(
            r#"
            INSERT INTO appeals (gis_id, number, category_id, appeal_text, response_text, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (gis_id) DO UPDATE
            SET appeal_text = EXCLUDED.appeal_text,
                response_text = EXCLUDED.response_text
            RETURNING {APPEAL_COLUMNS}
            "#
        ))
        .bind(&appeal.gis_id)
        .bind(&appeal.number)
        .bind(appeal.category_id)
        .bind(&appeal.appeal_text)
        .bind(&appeal.response_text)
        .bind(&appeal.address)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Worked examples linked to an article, trimmed projection.
    pub async fn examples_for_article(
        &self,
        article_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AppealExampleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("appeal_examples_for_article");
        let result = sqlx::query_as::<_, AppealExampleEntity>(
            r#"
            SELECT appeal_text, response_text
            FROM appeals
            WHERE article_id = $1
            LIMIT $2
            "#,
        )
        .bind(article_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
