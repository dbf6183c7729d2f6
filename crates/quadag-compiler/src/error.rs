//! Optimizer error types

use quadag_core::Quadruple;
use std::fmt;
use thiserror::Error;

/// Operand slot of a quadruple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSlot {
    First,
    Second,
}

impl fmt::Display for OperandSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandSlot::First => f.write_str("operand1"),
            OperandSlot::Second => f.write_str("operand2"),
        }
    }
}

/// Optimizer error
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// A required operand slot is empty
    #[error("Instruction {index} {quad}: missing {slot}")]
    MissingOperand {
        index: usize,
        slot: OperandSlot,
        quad: Quadruple,
    },

    /// A value-producing instruction has no destination
    #[error("Instruction {index} {quad}: missing destination")]
    MissingDestination { index: usize, quad: Quadruple },

    /// A numeric literal was used as a destination
    #[error("Instruction {index} {quad}: literal destination `{}`", .quad.result)]
    LiteralDestination { index: usize, quad: Quadruple },

    /// Invalid optimizer options
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl OptimizeError {
    /// Index of the offending input instruction, for structural errors
    pub fn instruction_index(&self) -> Option<usize> {
        match self {
            OptimizeError::MissingOperand { index, .. }
            | OptimizeError::MissingDestination { index, .. }
            | OptimizeError::LiteralDestination { index, .. } => Some(*index),
            OptimizeError::Config(_) => None,
        }
    }
}

/// Result type for optimizer operations
pub type Result<T> = std::result::Result<T, OptimizeError>;
