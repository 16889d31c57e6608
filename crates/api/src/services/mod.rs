//! Business logic services.

pub mod auth;
pub mod bootstrap;
pub mod import;
