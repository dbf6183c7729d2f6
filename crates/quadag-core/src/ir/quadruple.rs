//! Quadruple instructions

use crate::error::{CoreError, Result};
use crate::ir::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A four-address instruction: operation, two operands and a destination.
///
/// Operand and destination fields hold an identifier, numeric literal text,
/// or the empty string for an unused slot. Jumps carry their target label in
/// `result`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quadruple {
    /// Operation tag
    pub op: Operation,

    /// First operand
    #[serde(default)]
    pub arg1: String,

    /// Second operand
    #[serde(default)]
    pub arg2: String,

    /// Destination variable or jump target
    #[serde(default)]
    pub result: String,
}

impl Quadruple {
    /// Create a new quadruple
    pub fn new(
        op: Operation,
        arg1: impl Into<String>,
        arg2: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            op,
            arg1: arg1.into(),
            arg2: arg2.into(),
            result: result.into(),
        }
    }

    /// Create a plain copy `( :=, source, , target )`
    pub fn assign(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(Operation::Assign, source, "", target)
    }

    /// First operand, if the slot is used
    pub fn operand1(&self) -> Option<&str> {
        non_empty(&self.arg1)
    }

    /// Second operand, if the slot is used
    pub fn operand2(&self) -> Option<&str> {
        non_empty(&self.arg2)
    }

    /// Destination, if the slot is used
    pub fn destination(&self) -> Option<&str> {
        non_empty(&self.result)
    }

    /// Parse one listing line, reporting errors against `line`
    pub fn parse_line(text: &str, line: usize) -> Result<Self> {
        let malformed = |reason: &str| CoreError::MalformedQuadruple {
            line,
            reason: reason.to_string(),
        };

        let body = strip_index(text.trim());
        let inner = body
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| malformed("expected `( op, arg1, arg2, result )`"))?;

        let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(malformed(&format!("expected 4 fields, found {}", fields.len())));
        }

        let op = fields[0].parse::<Operation>().map_err(|err| match err {
            CoreError::UnknownOperation(tag) => malformed(&format!("unknown operation `{tag}`")),
            other => other,
        })?;

        Ok(Self::new(
            op,
            empty_marker(fields[1]),
            empty_marker(fields[2]),
            empty_marker(fields[3]),
        ))
    }
}

impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "( {}, {}, {}, {} )",
            self.op, self.arg1, self.arg2, self.result
        )
    }
}

impl FromStr for Quadruple {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_line(s, 1)
    }
}

fn non_empty(field: &str) -> Option<&str> {
    (!field.is_empty()).then_some(field)
}

// Front ends print `_` for unused slots
fn empty_marker(field: &str) -> &str {
    if field == "_" {
        ""
    } else {
        field
    }
}

// Listings may number their lines as `3: ( ... )` or `3. ( ... )`
fn strip_index(text: &str) -> &str {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return text;
    }
    match text[digits..].strip_prefix([':', '.']) {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let quad = Quadruple::new(Operation::Add, "a", "b", "T0");
        assert_eq!(quad.to_string(), "( +, a, b, T0 )");

        let copy = Quadruple::assign("T0", "x");
        assert_eq!(copy.to_string(), "( :=, T0, , x )");
    }

    #[test]
    fn test_parse_line() {
        let quad: Quadruple = "( -, 0, a, T1 )".parse().unwrap();
        assert_eq!(quad, Quadruple::new(Operation::Sub, "0", "a", "T1"));
    }

    #[test]
    fn test_parse_line_with_index_and_placeholders() {
        let quad = Quadruple::parse_line("  4: ( JMP, _, _, 12 )", 4).unwrap();
        assert_eq!(quad, Quadruple::new(Operation::Jmp, "", "", "12"));

        let quad = Quadruple::parse_line("5. (WRITE,x,,)", 5).unwrap();
        assert_eq!(quad, Quadruple::new(Operation::Write, "x", "", ""));
    }

    #[test]
    fn test_parse_line_errors() {
        let err = Quadruple::parse_line("+, a, b, c", 3).unwrap_err();
        assert!(matches!(err, CoreError::MalformedQuadruple { line: 3, .. }));

        let err = Quadruple::parse_line("( +, a, b )", 2).unwrap_err();
        assert!(matches!(err, CoreError::MalformedQuadruple { line: 2, .. }));

        let err = Quadruple::parse_line("( MOD, a, b, c )", 7).unwrap_err();
        match err {
            CoreError::MalformedQuadruple { line, reason } => {
                assert_eq!(line, 7);
                assert!(reason.contains("MOD"));
            }
            other => panic!("Expected MalformedQuadruple, got {other:?}"),
        }
    }

    #[test]
    fn test_slot_accessors() {
        let quad = Quadruple::new(Operation::Odd, "x", "", "T2");
        assert_eq!(quad.operand1(), Some("x"));
        assert_eq!(quad.operand2(), None);
        assert_eq!(quad.destination(), Some("T2"));
    }
}
