//! Content statistics for the admin dashboard.

use serde::{Deserialize, Serialize};

/// Aggregate content counts plus the summed article view counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub articles: i64,
    pub categories: i64,
    pub appeals: i64,
    pub total_views: i64,
}
