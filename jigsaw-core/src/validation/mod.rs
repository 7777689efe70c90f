//! Consistency checks for generated puzzle data.

mod validate;

pub use validate::{validate_layouts, ValidationResult};
