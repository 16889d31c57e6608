//! HTTP route handlers.

pub mod admin_articles;
pub mod admin_categories;
pub mod articles;
pub mod auth;
pub mod categories;
pub mod health;
pub mod import;
pub mod search;
pub mod stats;
