//! Structured logging with fetch context.
//!
//! Provides logging macros and utilities that include fetch_id and audit_id
//! in every log message for easy correlation.

pub mod structured;

pub use structured::*;
