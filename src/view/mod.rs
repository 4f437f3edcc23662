//! List view module.
//!
//! Derived, ordered views over resolved audits:
//! - Product list filters (risk, match level, search) and sorting
//! - Dashboard filter by violation type

pub mod list;
pub mod violations;

pub use list::*;
pub use violations::*;
