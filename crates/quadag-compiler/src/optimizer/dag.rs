//! DAG node definitions
//!
//! Nodes live in the `NodeTable` arena and refer to each other by `NodeId`.
//! Variables point at nodes through the builder's binding map and nodes hold
//! the names currently bound to them, so no node ever owns another.

use quadag_core::{Operation, Quadruple};
use std::collections::BTreeSet;
use std::fmt;

/// Index of a node within its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Operation of an operator node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DagOp {
    Add,
    Sub,
    Mul,
    Div,
    Odd,
    /// Unary minus, written `(-, 0, x, d)` by the front end
    UMinus,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl DagOp {
    /// Map a DAG-eligible quadruple operation. Assignment and barriers have
    /// no operator node.
    pub fn from_operation(op: Operation) -> Option<Self> {
        let dag_op = match op {
            Operation::Add => DagOp::Add,
            Operation::Sub => DagOp::Sub,
            Operation::Mul => DagOp::Mul,
            Operation::Div => DagOp::Div,
            Operation::Odd => DagOp::Odd,
            Operation::Eq => DagOp::Eq,
            Operation::Ne => DagOp::Ne,
            Operation::Lt => DagOp::Lt,
            Operation::Le => DagOp::Le,
            Operation::Gt => DagOp::Gt,
            Operation::Ge => DagOp::Ge,
            Operation::Assign
            | Operation::Read
            | Operation::Write
            | Operation::Jmp
            | Operation::Jpc => return None,
        };
        Some(dag_op)
    }

    /// Returns true for operations taking a single operand
    pub fn is_unary(&self) -> bool {
        matches!(self, DagOp::Odd | DagOp::UMinus)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DagOp::UMinus => "UMINUS",
            other => other.operation().as_str(),
        }
    }

    // UMINUS shares the subtraction tag in emitted code
    fn operation(&self) -> Operation {
        match self {
            DagOp::Add => Operation::Add,
            DagOp::Sub | DagOp::UMinus => Operation::Sub,
            DagOp::Mul => Operation::Mul,
            DagOp::Div => Operation::Div,
            DagOp::Odd => Operation::Odd,
            DagOp::Eq => Operation::Eq,
            DagOp::Ne => Operation::Ne,
            DagOp::Lt => Operation::Lt,
            DagOp::Le => Operation::Le,
            DagOp::Gt => Operation::Gt,
            DagOp::Ge => Operation::Ge,
        }
    }

    /// Build the instruction computing this operation into `dest`.
    ///
    /// `UMINUS x` is written back as `(-, 0, x, dest)` and unary predicates
    /// leave the second operand empty.
    pub fn to_quadruple(&self, args: &[String], dest: String) -> Quadruple {
        let first = args.first().cloned().unwrap_or_default();
        match self {
            DagOp::UMinus => Quadruple::new(Operation::Sub, "0", first, dest),
            DagOp::Odd => Quadruple::new(Operation::Odd, first, "", dest),
            _ => {
                let second = args.get(1).cloned().unwrap_or_default();
                Quadruple::new(self.operation(), first, second, dest)
            }
        }
    }
}

impl fmt::Display for DagOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Leaf {
    /// Numeric literal, in the text it was written with
    Const(String),
    /// Value a variable holds on entry to the block
    Ident(String),
    /// Value stored into `name` by the READ at instruction `index`
    Input { name: String, index: usize },
}

impl Leaf {
    /// Literal or identifier text
    pub fn text(&self) -> &str {
        match self {
            Leaf::Const(text) | Leaf::Ident(text) => text,
            Leaf::Input { name, .. } => name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Leaf::Const(_) => "const",
            Leaf::Ident(_) => "ident",
            Leaf::Input { .. } => "input",
        }
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(Leaf),
    Operator { op: DagOp, children: Vec<NodeId> },
}

/// A node in the block DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Variables whose current value is this node
    pub identifiers: BTreeSet<String>,
}

impl DagNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            identifiers: BTreeSet::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Value known while optimizing
    pub fn is_constant(&self) -> bool {
        self.constant_text().is_some()
    }

    /// Canonical literal of a constant node
    pub fn constant_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(Leaf::Const(text)) => Some(text),
            _ => None,
        }
    }

    /// Ordered children of an operator node; empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Operator { children, .. } => children,
            NodeKind::Leaf(_) => &[],
        }
    }
}

impl fmt::Display for DagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Leaf(leaf) => write!(f, "{} {} '{}'", self.id, leaf.label(), leaf.text())?,
            NodeKind::Operator { op, children } => {
                write!(f, "{} op '{}' children [", self.id, op)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")?;
            }
        }
        if let Some(text) = self.constant_text() {
            write!(f, " (const {text})")?;
        }
        f.write_str(" identifiers {")?;
        for name in &self.identifiers {
            write!(f, " {name}")?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_operation() {
        assert_eq!(DagOp::from_operation(Operation::Mul), Some(DagOp::Mul));
        assert_eq!(DagOp::from_operation(Operation::Ge), Some(DagOp::Ge));
        assert_eq!(DagOp::from_operation(Operation::Assign), None);
        assert_eq!(DagOp::from_operation(Operation::Write), None);
    }

    #[test]
    fn test_uminus_emits_subtraction_from_zero() {
        let quad = DagOp::UMinus.to_quadruple(&["a".to_string()], "RT0".to_string());
        assert_eq!(quad, Quadruple::new(Operation::Sub, "0", "a", "RT0"));
    }

    #[test]
    fn test_odd_emits_empty_second_operand() {
        let quad = DagOp::Odd.to_quadruple(&["x".to_string()], "T1".to_string());
        assert_eq!(quad, Quadruple::new(Operation::Odd, "x", "", "T1"));
    }

    #[test]
    fn test_binary_emission() {
        let args = ["a".to_string(), "b".to_string()];
        let quad = DagOp::Le.to_quadruple(&args, "c".to_string());
        assert_eq!(quad, Quadruple::new(Operation::Le, "a", "b", "c"));
    }

    #[test]
    fn test_node_display() {
        let mut node = DagNode::new(
            NodeId(2),
            NodeKind::Operator {
                op: DagOp::Add,
                children: vec![NodeId(0), NodeId(1)],
            },
        );
        node.identifiers.insert("x".to_string());
        assert_eq!(node.to_string(), "n2 op '+' children [n0 n1] identifiers { x }");

        let leaf = DagNode::new(NodeId(0), NodeKind::Leaf(Leaf::Const("5".to_string())));
        assert_eq!(leaf.to_string(), "n0 const '5' (const 5) identifiers { }");
    }
}
