//! Domain model definitions.

pub mod appeal;
pub mod article;
pub mod category;
pub mod import;
pub mod permission;
pub mod search;
pub mod stats;
pub mod user;

pub use appeal::{Appeal, AppealExample};
pub use article::{Article, ArticleSuggestion, ArticleWithCategory, CategoryRef};
pub use category::{Category, CategoryDetail, CategoryWithChildren};
pub use import::{
    ImportRow, ImportSummary, ADDRESS_COLUMNS, APPEALS_SHEET_NAME, APPEAL_TEXT_COLUMNS,
    CODE_COLUMNS, GIS_ID_COLUMNS, NUMBER_COLUMNS, RESPONSE_TEXT_COLUMNS, TOPIC_COLUMNS,
};
pub use permission::Permission;
pub use search::{PopularQuery, SearchSort, SortDirection};
pub use stats::AdminStats;
pub use user::{Role, User, UserProfile};
