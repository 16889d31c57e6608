//! Persistence layer for the GIS knowledge base backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - SQL migrations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
