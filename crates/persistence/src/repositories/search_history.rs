//! Search history counters.

use sqlx::PgPool;

use crate::entities::SearchHistoryEntity;
use crate::metrics::QueryTimer;

/// Repository for the per-query search counter.
#[derive(Clone)]
pub struct SearchHistoryRepository {
    pool: PgPool,
}

impl SearchHistoryRepository {
    /// Creates a new SearchHistoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Increment the counter for a query, inserting it on first sight.
    pub async fn record(&self, query: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("record_search_query");
        sqlx::query(
            r#"
            INSERT INTO search_history (query, count)
            VALUES ($1, 1)
            ON CONFLICT (query) DO UPDATE
            SET count = search_history.count + 1,
                updated_at = NOW()
            "#,
        )
        .bind(query)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Most frequent queries, count descending.
    pub async fn popular(&self, limit: i64) -> Result<Vec<SearchHistoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("popular_search_queries");
        let result = sqlx::query_as::<_, SearchHistoryEntity>(
            r#"
            SELECT query, count, updated_at
            FROM search_history
            ORDER BY count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
