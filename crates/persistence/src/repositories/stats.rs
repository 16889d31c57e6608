//! Aggregate content statistics.

use sqlx::PgPool;

use domain::models::AdminStats;

use crate::metrics::QueryTimer;

/// Repository for the admin statistics endpoint.
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    /// Creates a new StatsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entity counts and the summed article view counter.
    pub async fn fetch(&self) -> Result<AdminStats, sqlx::Error> {
        let timer = QueryTimer::new("fetch_admin_stats");
        let (articles, categories, appeals, total_views) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM articles),
                    (SELECT COUNT(*) FROM categories),
                    (SELECT COUNT(*) FROM appeals),
                    (SELECT COALESCE(SUM(view_count), 0) FROM articles)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;
        timer.record();

        Ok(AdminStats {
            articles,
            categories,
            appeals,
            total_views,
        })
    }
}
