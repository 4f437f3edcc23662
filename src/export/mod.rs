//! Report export module.

pub mod csv;

pub use self::csv::*;
