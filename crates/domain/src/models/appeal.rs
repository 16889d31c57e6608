//! Imported appeal records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A historical citizen inquiry imported from the external appeal system.
///
/// `gis_id` is the external system identifier and the idempotency key for
/// re-imports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appeal {
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

/// Trimmed appeal shown alongside an article as a worked example.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealExample {
    pub appeal_text: String,
    pub response_text: Option<String>,
}
