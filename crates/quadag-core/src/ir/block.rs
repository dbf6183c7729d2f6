//! Quadruple listings
//!
//! A block is an ordered sequence of quadruples. Its text form is one
//! `( op, arg1, arg2, result )` per line.

use crate::error::{CoreError, Result};
use crate::ir::Quadruple;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered quadruple sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    /// The sequence of instructions
    pub quads: Vec<Quadruple>,
}

impl Block {
    /// Create a new block
    pub fn new(quads: Vec<Quadruple>) -> Self {
        Self { quads }
    }

    /// Get the number of instructions
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Check if block is empty
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Add an instruction to the end
    pub fn push(&mut self, quad: Quadruple) {
        self.quads.push(quad);
    }

    /// Iterate over the instructions
    pub fn iter(&self) -> std::slice::Iter<'_, Quadruple> {
        self.quads.iter()
    }

    /// Borrow the instructions as a slice
    pub fn as_slice(&self) -> &[Quadruple] {
        &self.quads
    }

    /// Render the listing with a zero-based instruction index on every line
    pub fn numbered(&self) -> String {
        self.quads
            .iter()
            .enumerate()
            .map(|(index, quad)| format!("{index}: {quad}\n"))
            .collect()
    }
}

impl From<Vec<Quadruple>> for Block {
    fn from(quads: Vec<Quadruple>) -> Self {
        Self::new(quads)
    }
}

impl FromIterator<Quadruple> for Block {
    fn from_iter<I: IntoIterator<Item = Quadruple>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Block {
    type Item = Quadruple;
    type IntoIter = std::vec::IntoIter<Quadruple>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.into_iter()
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Quadruple;
    type IntoIter = std::slice::Iter<'a, Quadruple>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quad in &self.quads {
            writeln!(f, "{quad}")?;
        }
        Ok(())
    }
}

impl FromStr for Block {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        s.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| Quadruple::parse_line(line, index + 1))
            .collect()
    }
}
