//! Node table
//!
//! Owns every DAG node of one block. Leaves are unique per (kind, text) and
//! operator nodes are unique per (operation, ordered child ids), so equal
//! computations always share one node.

use crate::optimizer::constant_folding::ConstantEvaluator;
use crate::optimizer::dag::{DagNode, DagOp, Leaf, NodeId, NodeKind};
use quadag_core::ir::{is_numeric_literal, parse_numeric_literal};
use std::collections::HashMap;
use std::fmt;

/// Arena of DAG nodes with structural lookup
#[derive(Debug, Clone)]
pub struct NodeTable {
    nodes: Vec<DagNode>,
    leaves: HashMap<Leaf, NodeId>,
    operators: HashMap<(DagOp, Vec<NodeId>), NodeId>,
    evaluator: ConstantEvaluator,
    fold_constants: bool,
    folded: usize,
    shared: usize,
}

impl NodeTable {
    /// Create an empty table
    pub fn new(fold_constants: bool) -> Self {
        Self {
            nodes: Vec::new(),
            leaves: HashMap::new(),
            operators: HashMap::new(),
            evaluator: ConstantEvaluator::new(),
            fold_constants,
            folded: 0,
            shared: 0,
        }
    }

    /// Get or create the leaf for a literal or identifier
    pub fn leaf(&mut self, text: &str) -> NodeId {
        let leaf = if is_numeric_literal(text) {
            Leaf::Const(text.to_string())
        } else {
            Leaf::Ident(text.to_string())
        };
        self.intern_leaf(leaf)
    }

    /// Create the leaf for the value read into `name` at instruction `index`
    pub fn input_leaf(&mut self, name: &str, index: usize) -> NodeId {
        self.intern_leaf(Leaf::Input {
            name: name.to_string(),
            index,
        })
    }

    /// Get, fold or create the node computing `op` over the given children.
    ///
    /// A successful fold yields the leaf of the folded literal, which keeps
    /// later operations over the result foldable.
    pub fn operator(&mut self, op: DagOp, first: NodeId, second: Option<NodeId>) -> NodeId {
        // `0 - x` is how unary minus is written, whether the zero is literal,
        // folded or read from a variable
        let (op, first, second) = match (op, second) {
            (DagOp::Sub, Some(value)) if self.is_zero(first) => (DagOp::UMinus, value, None),
            _ => (op, first, second),
        };

        if self.fold_constants {
            if let Some(folded) = self.fold(op, first, second) {
                return folded;
            }
        }

        let children: Vec<NodeId> = std::iter::once(first).chain(second).collect();
        let key = (op, children);
        if let Some(&id) = self.operators.get(&key) {
            self.shared += 1;
            tracing::debug!(node = %id, op = %op, "Reusing common subexpression");
            return id;
        }

        let id = self.push(NodeKind::Operator {
            op,
            children: key.1.clone(),
        });
        self.operators.insert(key, id);
        id
    }

    fn fold(&mut self, op: DagOp, first: NodeId, second: Option<NodeId>) -> Option<NodeId> {
        let lhs = self.node(first).constant_text()?.to_string();
        let rhs = match second {
            Some(id) => Some(self.node(id).constant_text()?.to_string()),
            None => None,
        };

        let literal = self.evaluator.evaluate(op, &lhs, rhs.as_deref())?;
        self.folded += 1;
        tracing::debug!(op = %op, lhs = %lhs, rhs = ?rhs, result = %literal, "Folded constant");
        Some(self.intern_leaf(Leaf::Const(literal)))
    }

    fn is_zero(&self, id: NodeId) -> bool {
        self.node(id)
            .constant_text()
            .and_then(parse_numeric_literal)
            == Some(0.0)
    }

    fn intern_leaf(&mut self, leaf: Leaf) -> NodeId {
        if let Some(&id) = self.leaves.get(&leaf) {
            return id;
        }
        let id = self.push(NodeKind::Leaf(leaf.clone()));
        self.leaves.insert(leaf, id);
        id
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DagNode::new(id, kind));
        id
    }

    /// Look up an existing leaf without creating it
    pub fn find_leaf(&self, leaf: &Leaf) -> Option<NodeId> {
        self.leaves.get(leaf).copied()
    }

    /// Get a node by id
    ///
    /// # Panics
    /// Panics if `id` did not come from this table.
    pub fn node(&self, id: NodeId) -> &DagNode {
        &self.nodes[id.index()]
    }

    /// Record that `name` currently holds the value of `id`
    pub fn add_identifier(&mut self, id: NodeId, name: &str) {
        self.nodes[id.index()].identifiers.insert(name.to_string());
    }

    /// Record that `name` no longer holds the value of `id`
    pub fn remove_identifier(&mut self, id: NodeId, name: &str) {
        self.nodes[id.index()].identifiers.remove(name);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of operations replaced by a folded literal
    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Number of lookups answered by an existing operator node
    pub fn shared(&self) -> usize {
        self.shared
    }
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Display for NodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DAG ({} nodes)", self.nodes.len())?;
        for node in &self.nodes {
            writeln!(f, "  {node}")?;
        }
        Ok(())
    }
}
