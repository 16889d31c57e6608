//! Shared utilities for the GIS knowledge base backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation
//! - Password hashing with Argon2id
//! - Page-number pagination
//! - Slug generation with Cyrillic transliteration

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod slug;
