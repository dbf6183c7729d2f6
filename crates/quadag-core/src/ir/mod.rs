//! Quadruple Intermediate Representation
//!
//! Four-address instructions as produced by the front end and consumed by
//! the block optimizer and later code generation.

pub mod block;
pub mod literal;
pub mod operation;
pub mod quadruple;

pub use block::Block;
pub use literal::{is_numeric_literal, parse_numeric_literal, render_number};
pub use operation::Operation;
pub use quadruple::Quadruple;
