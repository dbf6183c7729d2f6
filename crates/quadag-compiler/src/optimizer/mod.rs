//! Optimization module
//!
//! This module builds a DAG for one basic block and rebuilds the block from it.

pub mod block_builder;
pub mod constant_folding;
pub mod dag;
pub mod naming;
pub mod node_table;
pub mod reconstructor;

// Re-export for convenience
pub use block_builder::{Barrier, BlockBuilder, BuiltBlock};
pub use constant_folding::ConstantEvaluator;
pub use dag::{DagNode, DagOp, Leaf, NodeId, NodeKind};
pub use naming::{FreshNames, TempNaming};
pub use node_table::NodeTable;
pub use reconstructor::Reconstructor;
