//! Capability set used for route authorization.
//!
//! Roles resolve to permission sets once (see [`crate::models::user::Role`]);
//! each admin route declares the single permission it requires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability required by a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create, update, delete, and list unpublished articles.
    ManageArticles,
    /// Create, update, and delete categories.
    ManageCategories,
    /// Upload appeal spreadsheets.
    ImportAppeals,
    /// Read content statistics.
    ViewStats,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageArticles => "articles:manage",
            Permission::ManageCategories => "categories:manage",
            Permission::ImportAppeals => "appeals:import",
            Permission::ViewStats => "stats:view",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_display() {
        assert_eq!(Permission::ManageArticles.to_string(), "articles:manage");
        assert_eq!(Permission::ViewStats.to_string(), "stats:view");
    }

    #[test]
    fn test_permission_serialization() {
        assert_eq!(
            serde_json::to_string(&Permission::ImportAppeals).unwrap(),
            "\"import_appeals\""
        );
    }
}
