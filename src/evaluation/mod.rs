//! Field evaluation module.
//!
//! Maps one raw audit record plus its linked listing and master product to
//! the seven field comparisons shown to the reviewer.

pub mod fields;
pub mod format;
pub mod rules;

pub use fields::*;
pub use format::*;
pub use rules::{FieldRule, RuleInput, FIELD_RULES};
