//! Category repository for database operations.

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use domain::models::{Category, CategoryWithChildren};

use crate::entities::{CategoryEntity, CategoryWithCountEntity};
use crate::metrics::QueryTimer;

const CATEGORY_COLUMNS: &str =
    "id, code, name, slug, description, icon, parent_id, sort_order, created_at, updated_at";

/// Fields for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub code: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub code: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub sort_order: Option<i32>,
}

/// Repository for category-related database operations.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Root categories with their sort-ordered children and published
    /// article counts, for the public category tree.
    pub async fn list_tree(&self) -> Result<Vec<CategoryWithChildren>, sqlx::Error> {
        let timer = QueryTimer::new("list_category_tree");

        let roots = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id IS NULL ORDER BY sort_order ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let children = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id IS NOT NULL ORDER BY sort_order ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let counts: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT category_id, COUNT(*)
            FROM articles
            WHERE is_published = TRUE
            GROUP BY category_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let counts: HashMap<Uuid, i64> = counts.into_iter().collect();
        let mut by_parent: HashMap<Uuid, Vec<Category>> = HashMap::new();
        for child in children {
            if let Some(parent_id) = child.parent_id {
                by_parent.entry(parent_id).or_default().push(child.into());
            }
        }

        Ok(roots
            .into_iter()
            .map(|root| {
                let article_count = counts.get(&root.id).copied().unwrap_or(0);
                let children = by_parent.remove(&root.id).unwrap_or_default();
                CategoryWithChildren {
                    category: root.into(),
                    children,
                    article_count,
                }
            })
            .collect())
    }

    /// Find a category by its URL slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category_by_slug");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category_by_id");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a category by its dotted taxonomy code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_category_by_code");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Children of a category, sort-ordered.
    pub async fn children_of(&self, parent_id: Uuid) -> Result<Vec<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_category_children");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY sort_order ASC"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a category.
    pub async fn create(&self, category: NewCategory) -> Result<CategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_category");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            r#"
            INSERT INTO categories (code, name, slug, description, icon, parent_id, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&category.code)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.parent_id)
        .bind(category.sort_order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partially update a category. Returns None when the id is unknown.
    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateCategory,
    ) -> Result<Option<CategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_category");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            r#"
            UPDATE categories
            SET code = COALESCE($2, code),
                name = COALESCE($3, name),
                slug = COALESCE($4, slug),
                description = COALESCE($5, description),
                icon = COALESCE($6, icon),
                parent_id = COALESCE($7, parent_id),
                sort_order = COALESCE($8, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.code)
        .bind(&update.name)
        .bind(&update.slug)
        .bind(&update.description)
        .bind(&update.icon)
        .bind(update.parent_id)
        .bind(update.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Hard-delete a category. Returns the number of rows removed.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_category");
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// All categories with total (published and draft) article counts, for
    /// the admin listing.
    pub async fn list_all_with_counts(
        &self,
    ) -> Result<Vec<CategoryWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_categories_with_counts");
        let result = sqlx::query_as::<_, CategoryWithCountEntity>(
            r#"
            SELECT c.id, c.code, c.name, c.slug, c.description, c.icon,
                   c.parent_id, c.sort_order, c.created_at, c.updated_at,
                   COUNT(a.id) AS article_count
            FROM categories c
            LEFT JOIN articles a ON a.category_id = c.id
            GROUP BY c.id
            ORDER BY c.sort_order ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
