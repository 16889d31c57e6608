//! Search request and history types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort key accepted by the search endpoint.
///
/// "relevance" is approximated by view-count descending; there is no text
/// scoring model, documented as a deliberate simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    #[default]
    Relevance,
    Date,
    Views,
    Title,
}

impl FromStr for SearchSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(SearchSort::Relevance),
            "date" => Ok(SearchSort::Date),
            "views" => Ok(SearchSort::Views),
            "title" => Ok(SearchSort::Title),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Sort direction; ignored for relevance, which is always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// A popular-query row from the search history counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularQuery {
    pub query: String,
    pub count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(SearchSort::from_str("relevance").unwrap(), SearchSort::Relevance);
        assert_eq!(SearchSort::from_str("DATE").unwrap(), SearchSort::Date);
        assert_eq!(SearchSort::from_str("views").unwrap(), SearchSort::Views);
        assert_eq!(SearchSort::from_str("Title").unwrap(), SearchSort::Title);
        assert!(SearchSort::from_str("score").is_err());
    }

    #[test]
    fn test_sort_defaults() {
        assert_eq!(SearchSort::default(), SearchSort::Relevance);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn test_direction_as_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
