//! Storage module.
//!
//! SQL query builders and database models.
//! Note: Actual database operations are handled by the Python bridge.
//! This module provides row shapes and query building helpers.

pub mod models;
pub mod queries;

pub use models::*;
pub use queries::*;
