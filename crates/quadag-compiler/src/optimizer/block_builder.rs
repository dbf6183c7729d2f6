//! Block builder
//!
//! Walks the block once, turning arithmetic, predicates and assignments into
//! DAG nodes while tracking which node each variable currently holds. I/O and
//! jumps are set aside as barriers.

use crate::error::{OperandSlot, OptimizeError, Result};
use crate::optimizer::dag::{DagOp, NodeId};
use crate::optimizer::node_table::NodeTable;
use quadag_core::ir::is_numeric_literal;
use quadag_core::{Operation, Quadruple};
use std::collections::BTreeMap;

/// An I/O or jump instruction kept out of the DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barrier {
    /// Position in the input block
    pub index: usize,
    /// The instruction, with a constant operand substituted
    pub quad: Quadruple,
    /// Node operand1 resolved to when the barrier was reached
    pub operand: Option<NodeId>,
    /// Input leaf holding the value a READ stores
    pub defines: Option<NodeId>,
}

/// State left behind once every instruction has been processed
#[derive(Debug, Clone)]
pub struct BuiltBlock {
    pub table: NodeTable,
    /// Current node of every variable assigned or read in the block
    pub bindings: BTreeMap<String, NodeId>,
    pub barriers: Vec<Barrier>,
}

/// Block builder
#[derive(Debug)]
pub struct BlockBuilder {
    table: NodeTable,
    bindings: BTreeMap<String, NodeId>,
    barriers: Vec<Barrier>,
}

impl BlockBuilder {
    /// Create a builder with an empty DAG
    pub fn new(fold_constants: bool) -> Self {
        Self {
            table: NodeTable::new(fold_constants),
            bindings: BTreeMap::new(),
            barriers: Vec::new(),
        }
    }

    /// Process a whole block
    pub fn build(mut self, quads: &[Quadruple]) -> Result<BuiltBlock> {
        for (index, quad) in quads.iter().enumerate() {
            self.push(index, quad)?;
        }
        Ok(self.finish())
    }

    /// Process the instruction at `index`.
    ///
    /// On error nothing is bound for the instruction.
    pub fn push(&mut self, index: usize, quad: &Quadruple) -> Result<()> {
        if quad.op.is_barrier() {
            return self.push_barrier(index, quad);
        }

        let dest = destination(index, quad)?;
        let node = match DagOp::from_operation(quad.op) {
            // Assignment aliases the source node
            None => {
                let source = operand(index, quad, OperandSlot::First)?;
                self.resolve(source)
            }
            Some(op) if op.is_unary() => {
                let value = operand(index, quad, OperandSlot::First)?;
                let value = self.resolve(value);
                self.table.operator(op, value, None)
            }
            Some(op) => {
                let lhs = operand(index, quad, OperandSlot::First)?;
                let rhs = operand(index, quad, OperandSlot::Second)?;
                let lhs = self.resolve(lhs);
                let rhs = self.resolve(rhs);
                self.table.operator(op, lhs, Some(rhs))
            }
        };
        self.bind(dest, node);
        Ok(())
    }

    fn push_barrier(&mut self, index: usize, quad: &Quadruple) -> Result<()> {
        let mut copy = quad.clone();
        let mut operand_node = None;
        let mut defines = None;

        match quad.op {
            Operation::Read => {
                let dest = destination(index, quad)?;
                let input = self.table.input_leaf(dest, index);
                self.bind(dest, input);
                defines = Some(input);
            }
            Operation::Write | Operation::Jpc => {
                let value = operand(index, quad, OperandSlot::First)?;
                let node = self.resolve(value);
                if let Some(text) = self.table.node(node).constant_text() {
                    copy.arg1 = text.to_string();
                }
                operand_node = Some(node);
            }
            _ => {}
        }

        tracing::debug!(index, barrier = %copy, "Recorded barrier");
        self.barriers.push(Barrier {
            index,
            quad: copy,
            operand: operand_node,
            defines,
        });
        Ok(())
    }

    /// Resolve operand text to its current node, binding unseen identifiers
    /// to their own leaf
    fn resolve(&mut self, text: &str) -> NodeId {
        if let Some(&node) = self.bindings.get(text) {
            return node;
        }
        let node = self.table.leaf(text);
        if !is_numeric_literal(text) {
            self.bind(text, node);
        }
        node
    }

    fn bind(&mut self, name: &str, node: NodeId) {
        if let Some(old) = self.bindings.insert(name.to_string(), node) {
            self.table.remove_identifier(old, name);
        }
        self.table.add_identifier(node, name);
        tracing::trace!(name, node = %node, "Bound variable");
    }

    /// Current node of `name`, if it was assigned or read in the block
    pub fn binding(&self, name: &str) -> Option<NodeId> {
        self.bindings.get(name).copied()
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    /// Hand over the DAG, bindings and barriers
    pub fn finish(self) -> BuiltBlock {
        BuiltBlock {
            table: self.table,
            bindings: self.bindings,
            barriers: self.barriers,
        }
    }
}

fn operand(index: usize, quad: &Quadruple, slot: OperandSlot) -> Result<&str> {
    let text = match slot {
        OperandSlot::First => quad.operand1(),
        OperandSlot::Second => quad.operand2(),
    };
    text.ok_or_else(|| OptimizeError::MissingOperand {
        index,
        slot,
        quad: quad.clone(),
    })
}

fn destination(index: usize, quad: &Quadruple) -> Result<&str> {
    let dest = quad
        .destination()
        .ok_or_else(|| OptimizeError::MissingDestination {
            index,
            quad: quad.clone(),
        })?;
    if is_numeric_literal(dest) {
        return Err(OptimizeError::LiteralDestination {
            index,
            quad: quad.clone(),
        });
    }
    Ok(dest)
}
