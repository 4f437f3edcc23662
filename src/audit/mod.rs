//! Derived audit entities.
//!
//! Everything here is rebuilt from raw rows on each fetch and owned by the
//! caller.

pub mod fields;
pub mod product;

pub use fields::*;
pub use product::*;
