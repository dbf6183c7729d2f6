//! quadag compiler - DAG optimization of quadruple blocks
//!
//! This crate removes common subexpressions, folds constants and drops dead
//! values within one basic block of quadruple code.

pub mod error;
pub mod compiler;
pub mod optimizer;

// Re-export main types
pub use error::{OperandSlot, OptimizeError, Result};
pub use compiler::{BlockOptimizer, OptimizationStats, Optimized, OptimizerOptions};

// Re-export optimizer types
pub use optimizer::{BlockBuilder, NodeTable, Reconstructor, TempNaming};
