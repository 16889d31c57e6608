//! Article domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::appeal::AppealExample;

/// A knowledge-base entry with body content and an optional operator
/// response template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub response_template: Option<String>,
    pub legal_reference: Option<String>,
    pub keywords: Vec<String>,
    pub view_count: i32,
    pub is_published: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Embedded category projection attached to article listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

/// An article with its owning category and, where loaded, the author name
/// and linked appeal examples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleWithCategory {
    #[serde(flatten)]
    pub article: Article,
    pub category: CategoryRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appeals: Option<Vec<AppealExample>>,
}

/// Lightweight projection for the autocomplete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSuggestion {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArticleWithCategory {
        ArticleWithCategory {
            article: Article {
                id: Uuid::new_v4(),
                category_id: Uuid::new_v4(),
                title: "Обработка обращений о неисправности домофона".to_string(),
                slug: "neispravnost-domofona".to_string(),
                summary: "Инструкция".to_string(),
                content: "# Неисправность домофона".to_string(),
                response_template: None,
                legal_reference: None,
                keywords: vec!["домофон".to_string()],
                view_count: 3,
                is_published: true,
                author_id: Uuid::new_v4(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            category: CategoryRef {
                id: Uuid::new_v4(),
                code: "12.6".to_string(),
                name: "Неисправный домофон".to_string(),
                slug: "neispravnyy-domofon".to_string(),
                icon: Some("Phone".to_string()),
            },
            author_name: None,
            appeals: None,
        }
    }

    #[test]
    fn test_article_with_category_flattens() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["slug"], "neispravnost-domofona");
        assert_eq!(json["category"]["code"], "12.6");
        assert_eq!(json["viewCount"], 3);
        // Optional relations are omitted when not loaded
        assert!(json.get("authorName").is_none());
        assert!(json.get("appeals").is_none());
    }
}
