//! Violation classification module.
//!
//! Derives from each audit:
//! - A single violation tag (ordered decision list)
//! - A threshold risk bucket from the fraud score

pub mod risk;
pub mod violation;

pub use risk::*;
pub use violation::*;
