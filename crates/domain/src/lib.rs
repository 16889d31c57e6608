//! Domain models for the GIS knowledge base backend.

pub mod models;
