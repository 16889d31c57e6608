//! Entity definitions (database row mappings).

pub mod appeal;
pub mod article;
pub mod category;
pub mod search_history;
pub mod user;

pub use appeal::{AppealEntity, AppealExampleEntity};
pub use article::{ArticleSuggestionEntity, ArticleWithCategoryEntity};
pub use category::{CategoryEntity, CategoryWithCountEntity};
pub use search_history::SearchHistoryEntity;
pub use user::UserEntity;
