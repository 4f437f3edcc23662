//! Violation detail extraction module.
//!
//! Lenient access to the semi-structured `violation_details` bag.

pub mod details;
pub mod json_path;

pub use details::*;
pub use json_path::*;
