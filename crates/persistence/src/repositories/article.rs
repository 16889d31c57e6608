//! Article repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ArticleWithCategoryEntity;
use crate::metrics::QueryTimer;

/// Shared SELECT prefix joining the owning category and the author.
pub(crate) const ARTICLE_SELECT: &str = r#"
SELECT a.id, a.category_id, a.title, a.slug, a.summary, a.content,
       a.response_template, a.legal_reference, a.keywords, a.view_count,
       a.is_published, a.author_id, a.created_at, a.updated_at,
       c.id AS cat_id, c.code AS cat_code, c.name AS cat_name,
       c.slug AS cat_slug, c.icon AS cat_icon,
       u.name AS author_name
FROM articles a
JOIN categories c ON c.id = a.category_id
JOIN users u ON u.id = a.author_id
"#;

/// Fields for creating an article.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub category_id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub response_template: Option<String>,
    pub legal_reference: Option<String>,
    pub keywords: Vec<String>,
    pub is_published: bool,
    pub author_id: Uuid,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticle {
    pub category_id: Option<Uuid>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub response_template: Option<String>,
    pub legal_reference: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Repository for article-related database operations.
#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    /// Creates a new ArticleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published articles, most recently updated first, optionally filtered
    /// by category.
    pub async fn list_published(
        &self,
        category_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_published_articles");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            r#"{ARTICLE_SELECT}
            WHERE a.is_published = TRUE
              AND ($1::uuid IS NULL OR a.category_id = $1)
            ORDER BY a.updated_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count of published articles, optionally filtered by category.
    pub async fn count_published(&self, category_id: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_published_articles");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM articles
            WHERE is_published = TRUE
              AND ($1::uuid IS NULL OR category_id = $1)
            "#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Top published articles by view count.
    pub async fn popular(&self, limit: i64) -> Result<Vec<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("popular_articles");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            "{ARTICLE_SELECT} WHERE a.is_published = TRUE ORDER BY a.view_count DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recently updated published articles.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("recent_articles");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            "{ARTICLE_SELECT} WHERE a.is_published = TRUE ORDER BY a.updated_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All published articles in a category, most recently updated first.
    pub async fn list_published_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_articles_for_category");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            r#"{ARTICLE_SELECT}
            WHERE a.is_published = TRUE AND a.category_id = $1
            ORDER BY a.updated_at DESC
            "#
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an article by its URL slug, published or not.
    pub async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_article_by_slug");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            "{ARTICLE_SELECT} WHERE a.slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an article by ID with its joined relations.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_article_by_id");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            "{ARTICLE_SELECT} WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Atomically increment an article's view counter.
    pub async fn increment_views(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("increment_article_views");
        sqlx::query("UPDATE articles SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    /// All articles including drafts, most recently updated first, for the
    /// admin listing.
    pub async fn list_all(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_articles");
        let result = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            "{ARTICLE_SELECT} ORDER BY a.updated_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total article count including drafts.
    pub async fn count_all(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_all_articles");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Create an article and return it with joined relations.
    pub async fn create(
        &self,
        article: NewArticle,
    ) -> Result<ArticleWithCategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_article");
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO articles (category_id, title, slug, summary, content,
                                  response_template, legal_reference, keywords,
                                  is_published, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(article.category_id)
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(&article.response_template)
        .bind(&article.legal_reference)
        .bind(&article.keywords)
        .bind(article.is_published)
        .bind(article.author_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();

        self.find_by_id(id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Partially update an article and return it with joined relations.
    /// Returns None when the id is unknown.
    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateArticle,
    ) -> Result<Option<ArticleWithCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_article");
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE articles
            SET category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                summary = COALESCE($4, summary),
                content = COALESCE($5, content),
                response_template = COALESCE($6, response_template),
                legal_reference = COALESCE($7, legal_reference),
                keywords = COALESCE($8, keywords),
                is_published = COALESCE($9, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(update.category_id)
        .bind(&update.title)
        .bind(&update.summary)
        .bind(&update.content)
        .bind(&update.response_template)
        .bind(&update.legal_reference)
        .bind(&update.keywords)
        .bind(update.is_published)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();

        match updated {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Hard-delete an article. Returns the number of rows removed.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_article");
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
