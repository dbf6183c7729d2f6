//! quadag Core - Quadruple intermediate code
//!
//! This crate provides the instruction types shared by the front end and the
//! block optimizer:
//! - `Operation` tags for arithmetic, relational, assignment, I/O and jumps
//! - `Quadruple` four-field instructions
//! - `Block` listings that print and parse the `( op, arg1, arg2, result )` form
//! - Numeric literal helpers
//! - Error types

pub mod error;
pub mod ir;

// Re-export commonly used types
pub use error::CoreError;
pub use ir::{Block, Operation, Quadruple};
