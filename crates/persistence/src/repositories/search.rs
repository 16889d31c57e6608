//! Search queries over published articles.
//!
//! The match policy OR-s four branches: case-insensitive substring against
//! title, summary, and content; substring against the owning category's
//! taxonomy code; and exact membership of any whitespace-split query token
//! in the keywords array.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{SearchSort, SortDirection};

use crate::entities::{ArticleSuggestionEntity, ArticleWithCategoryEntity};
use crate::metrics::QueryTimer;
use crate::repositories::article::ARTICLE_SELECT;

/// Escapes LIKE wildcards so user input matches literally.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Normalized search filter.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// Trimmed, lowercased query; empty means "match everything".
    pub query: String,
    pub category_id: Option<Uuid>,
    pub has_template: bool,
    pub sort: SearchSort,
    pub direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

impl SearchFilter {
    fn pattern(&self) -> String {
        format!("%{}%", escape_like(&self.query))
    }

    fn tokens(&self) -> Vec<String> {
        self.query.split_whitespace().map(str::to_string).collect()
    }

    /// ORDER BY clause for the validated sort key. Relevance is view-count
    /// descending regardless of direction; there is no scoring model.
    fn order_by(&self) -> String {
        match self.sort {
            SearchSort::Relevance => "a.view_count DESC".to_string(),
            SearchSort::Date => format!("a.updated_at {}", self.direction.as_sql()),
            SearchSort::Views => format!("a.view_count {}", self.direction.as_sql()),
            SearchSort::Title => format!("a.title {}", self.direction.as_sql()),
        }
    }
}

const SEARCH_WHERE: &str = r#"
a.is_published = TRUE
AND ($1 = '' OR a.title ILIKE $2 OR a.summary ILIKE $2 OR a.content ILIKE $2
     OR c.code ILIKE $2 OR a.keywords && $3)
AND ($4::uuid IS NULL OR a.category_id = $4)
AND (NOT $5 OR a.response_template IS NOT NULL)
"#;

/// Repository for search queries.
#[derive(Clone)]
pub struct SearchRepository {
    pool: PgPool,
}

impl SearchRepository {
    /// Creates a new SearchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a search, returning the page of matches and the total count.
    pub async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<(Vec<ArticleWithCategoryEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("search_articles");
        let pattern = filter.pattern();
        let tokens = filter.tokens();

        let articles = sqlx::query_as::<_, ArticleWithCategoryEntity>(&format!(
            "{ARTICLE_SELECT} WHERE {SEARCH_WHERE} ORDER BY {} LIMIT $6 OFFSET $7",
            filter.order_by()
        ))
        .bind(&filter.query)
        .bind(&pattern)
        .bind(&tokens)
        .bind(filter.category_id)
        .bind(filter.has_template)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM articles a
            JOIN categories c ON c.id = a.category_id
            WHERE {SEARCH_WHERE}
            "#
        ))
        .bind(&filter.query)
        .bind(&pattern)
        .bind(&tokens)
        .bind(filter.category_id)
        .bind(filter.has_template)
        .fetch_one(&self.pool)
        .await?;
        timer.record();

        Ok((articles, total))
    }

    /// Autocomplete lookup: published articles matching by title substring
    /// or exact single-token keyword match, lightweight projection.
    pub async fn suggestions(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<ArticleSuggestionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_suggestions");
        let pattern = format!("%{}%", escape_like(query));
        let token = vec![query.to_string()];

        let result = sqlx::query_as::<_, ArticleSuggestionEntity>(
            r#"
            SELECT a.id, a.title, a.slug, c.name AS category_name
            FROM articles a
            JOIN categories c ON c.id = a.category_id
            WHERE a.is_published = TRUE
              AND (a.title ILIKE $1 OR a.keywords && $2)
            LIMIT $3
            "#,
        )
        .bind(&pattern)
        .bind(&token)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(query: &str, sort: SearchSort, direction: SortDirection) -> SearchFilter {
        SearchFilter {
            query: query.to_string(),
            category_id: None,
            has_template: false,
            sort,
            direction,
            limit: 20,
            offset: 0,
        }
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_pattern_wraps_escaped_query() {
        let f = filter("50%", SearchSort::Relevance, SortDirection::Desc);
        assert_eq!(f.pattern(), "%50\\%%");
    }

    #[test]
    fn test_tokens_split_on_whitespace() {
        let f = filter("домофон не работает", SearchSort::Relevance, SortDirection::Desc);
        assert_eq!(f.tokens(), vec!["домофон", "не", "работает"]);

        let empty = filter("", SearchSort::Relevance, SortDirection::Desc);
        assert!(empty.tokens().is_empty());
    }

    #[test]
    fn test_order_by_relevance_ignores_direction() {
        let f = filter("q", SearchSort::Relevance, SortDirection::Asc);
        assert_eq!(f.order_by(), "a.view_count DESC");
    }

    #[test]
    fn test_order_by_uses_direction() {
        let f = filter("q", SearchSort::Date, SortDirection::Asc);
        assert_eq!(f.order_by(), "a.updated_at ASC");

        let f = filter("q", SearchSort::Title, SortDirection::Desc);
        assert_eq!(f.order_by(), "a.title DESC");
    }
}
