//! Repository implementations.

pub mod appeal;
pub mod article;
pub mod category;
pub mod search;
pub mod search_history;
pub mod stats;
pub mod user;

pub use appeal::{AppealRepository, UpsertAppeal};
pub use article::{ArticleRepository, NewArticle, UpdateArticle};
pub use category::{CategoryRepository, NewCategory, UpdateCategory};
pub use search::{SearchFilter, SearchRepository};
pub use search_history::SearchHistoryRepository;
pub use stats::StatsRepository;
pub use user::UserRepository;
