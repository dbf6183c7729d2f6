//! Operation tags for quadruples

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation carried in the first field of a quadruple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    // Arithmetic operations
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-); `(-, 0, x, d)` encodes unary minus
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (*)
    #[serde(rename = "*")]
    Mul,
    /// Division (/)
    #[serde(rename = "/")]
    Div,

    // Predicates
    /// Odd test (ODD), unary
    #[serde(rename = "ODD")]
    Odd,
    /// Equal (=)
    #[serde(rename = "=")]
    Eq,
    /// Not equal (#)
    #[serde(rename = "#")]
    Ne,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Le,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Ge,

    /// Plain assignment (:=)
    #[serde(rename = ":=")]
    Assign,

    // I/O
    /// Read a value into the destination (READ)
    #[serde(rename = "READ")]
    Read,
    /// Write operand1 (WRITE)
    #[serde(rename = "WRITE")]
    Write,

    // Control flow
    /// Unconditional jump to the destination label (JMP)
    #[serde(rename = "JMP")]
    Jmp,
    /// Conditional jump on operand1 to the destination label (JPC)
    #[serde(rename = "JPC")]
    Jpc,
}

impl Operation {
    /// All operations, in declaration order
    pub const ALL: [Operation; 16] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Odd,
        Operation::Eq,
        Operation::Ne,
        Operation::Lt,
        Operation::Le,
        Operation::Gt,
        Operation::Ge,
        Operation::Assign,
        Operation::Read,
        Operation::Write,
        Operation::Jmp,
        Operation::Jpc,
    ];

    /// The tag text used in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
            Operation::Odd => "ODD",
            Operation::Eq => "=",
            Operation::Ne => "#",
            Operation::Lt => "<",
            Operation::Le => "<=",
            Operation::Gt => ">",
            Operation::Ge => ">=",
            Operation::Assign => ":=",
            Operation::Read => "READ",
            Operation::Write => "WRITE",
            Operation::Jmp => "JMP",
            Operation::Jpc => "JPC",
        }
    }

    /// Returns true for READ and WRITE
    pub fn is_io(&self) -> bool {
        matches!(self, Operation::Read | Operation::Write)
    }

    /// Returns true for JMP and JPC
    pub fn is_jump(&self) -> bool {
        matches!(self, Operation::Jmp | Operation::Jpc)
    }

    /// Barrier instructions never take part in the DAG
    pub fn is_barrier(&self) -> bool {
        self.is_io() || self.is_jump()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_tags_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let err = "MOD".parse::<Operation>().unwrap_err();
        assert_eq!(err, CoreError::UnknownOperation("MOD".to_string()));
    }

    #[test]
    fn test_operation_classification() {
        assert!(Operation::Write.is_io());
        assert!(!Operation::Jmp.is_io());
        assert!(Operation::Read.is_barrier());
        assert!(Operation::Jpc.is_barrier());
        assert!(Operation::Jmp.is_jump());
        assert!(!Operation::Write.is_jump());
        assert!(!Operation::Div.is_barrier());
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Ne.to_string(), "#");
        assert_eq!(Operation::Assign.to_string(), ":=");
    }
}
