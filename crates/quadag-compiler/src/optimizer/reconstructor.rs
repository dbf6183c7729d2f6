//! Reconstructor
//!
//! Re-linearizes a built block. Roots are the values barriers read and the
//! final values of live-out variables (every bound variable that is not a
//! temporary). Operator nodes reachable from a root are emitted children
//! first, exactly once, into the first non-temporary variable bound to them
//! or else a fresh `RT` temporary. Nodes no root reaches are dropped.
//!
//! Layout of the output:
//! 1. READ/WRITE barriers in input order, each preceded by the code its
//!    operand needs,
//! 2. the remaining live-out computations, then copies into live-out
//!    variables still missing their value,
//! 3. JMP/JPC barriers in input order.
//!
//! The reconstructor tracks which node every name holds. Before an
//! instruction overwrites a name whose node is still needed, the value is
//! saved into a fresh temporary and read from there afterwards.

use crate::optimizer::block_builder::{Barrier, BuiltBlock};
use crate::optimizer::dag::{Leaf, NodeId, NodeKind};
use crate::optimizer::naming::{FreshNames, TempNaming};
use crate::optimizer::node_table::NodeTable;
use quadag_core::ir::is_numeric_literal;
use quadag_core::Quadruple;
use std::collections::{HashMap, HashSet};

/// Reconstructor for one built block
pub struct Reconstructor<'a> {
    table: &'a NodeTable,
    naming: &'a TempNaming,
    fresh: FreshNames,
    out: Vec<Quadruple>,
    /// Name each materialized node is read from
    names: HashMap<NodeId, String>,
    /// Node whose value each written name currently holds
    holders: HashMap<String, NodeId>,
    /// Reads of each node not emitted yet
    pending: HashMap<NodeId, usize>,
    emitted: HashSet<NodeId>,
}

impl<'a> Reconstructor<'a> {
    /// Prepare a reconstruction. `reserved` holds every name used by the
    /// input block; synthesized temporaries avoid them.
    pub fn new(table: &'a NodeTable, naming: &'a TempNaming, reserved: HashSet<String>) -> Self {
        Self {
            table,
            naming,
            fresh: naming.generator(reserved),
            out: Vec::new(),
            names: HashMap::new(),
            holders: HashMap::new(),
            pending: HashMap::new(),
            emitted: HashSet::new(),
        }
    }

    /// Emit the optimized instruction sequence
    pub fn run(mut self, block: &BuiltBlock) -> Vec<Quadruple> {
        let live_out: Vec<(&str, NodeId)> = block
            .bindings
            .iter()
            .filter(|(name, _)| !self.naming.is_temporary(name))
            .map(|(name, &node)| (name.as_str(), node))
            .collect();

        self.count_uses(block, &live_out);

        let (jumps, io): (Vec<&Barrier>, Vec<&Barrier>) =
            block.barriers.iter().partition(|barrier| barrier.quad.op.is_jump());

        for barrier in io {
            self.emit_barrier(barrier);
        }

        for &(_, node) in &live_out {
            self.emit(node);
        }
        for barrier in &jumps {
            if let Some(node) = barrier.operand {
                self.emit(node);
            }
        }

        for &(name, node) in &live_out {
            self.settle(name, node);
        }

        for barrier in jumps {
            self.emit_barrier(barrier);
        }

        self.out
    }

    /// Count, for every node reachable from a root, how many emitted
    /// instructions will read it
    fn count_uses(&mut self, block: &BuiltBlock, live_out: &[(&str, NodeId)]) {
        let table = self.table;
        let mut roots: Vec<NodeId> = Vec::new();
        for barrier in &block.barriers {
            if let Some(node) = barrier.operand {
                roots.push(node);
                self.add_use(node);
            }
        }
        for &(_, node) in live_out {
            roots.push(node);
            self.add_use(node);
        }

        let mut reached: HashSet<NodeId> = HashSet::new();
        while let Some(node) = roots.pop() {
            if !reached.insert(node) {
                continue;
            }
            for &child in table.node(node).children() {
                self.add_use(child);
                roots.push(child);
            }
        }
    }

    fn add_use(&mut self, node: NodeId) {
        *self.pending.entry(node).or_insert(0) += 1;
    }

    fn consume(&mut self, node: NodeId) {
        if let Some(count) = self.pending.get_mut(&node) {
            *count = count.saturating_sub(1);
        }
    }

    fn emit_barrier(&mut self, barrier: &Barrier) {
        let mut quad = barrier.quad.clone();

        if let Some(node) = barrier.operand {
            self.emit(node);
            if !self.table.node(node).is_constant() {
                quad.arg1 = self.name_of(node).to_string();
            }
            self.consume(node);
        }

        if let Some(input) = barrier.defines {
            self.claim(&quad.result, input, true);
        }

        tracing::trace!(instruction = %quad, "Emitted barrier");
        self.out.push(quad);
    }

    /// Emit the instruction computing `node`, after its children
    fn emit(&mut self, node: NodeId) {
        if !self.emitted.insert(node) {
            return;
        }

        let table = self.table;
        let (op, children) = match &table.node(node).kind {
            NodeKind::Leaf(_) => return,
            NodeKind::Operator { op, children } => (*op, children),
        };

        for &child in children {
            self.emit(child);
        }

        let args: Vec<String> = children
            .iter()
            .map(|&child| self.name_of(child).to_string())
            .collect();
        for &child in children {
            self.consume(child);
        }

        let dest = self.result_name(node);
        self.claim(&dest, node, true);

        let quad = op.to_quadruple(&args, dest);
        tracing::trace!(node = %node, instruction = %quad, "Emitted node");
        self.out.push(quad);
    }

    /// First non-temporary variable holding `node`, else a fresh temporary
    fn result_name(&mut self, node: NodeId) -> String {
        let naming = self.naming;
        let table = self.table;
        table
            .node(node)
            .identifiers
            .iter()
            .find(|name| !naming.is_temporary(name))
            .cloned()
            .unwrap_or_else(|| self.fresh.next_name())
    }

    /// Make sure live-out variable `name` ends up holding `node`
    fn settle(&mut self, name: &str, node: NodeId) {
        if self.holder_of(name) == Some(node) {
            self.consume(node);
            return;
        }

        let source = self.name_of(node).to_string();
        self.consume(node);
        self.claim(name, node, false);

        let quad = Quadruple::assign(source, name);
        tracing::trace!(instruction = %quad, "Emitted live-out copy");
        self.out.push(quad);
    }

    /// Record that the next instruction writes `node` into `name`, saving the
    /// value `name` held first if something still reads it from there
    fn claim(&mut self, name: &str, node: NodeId, primary: bool) {
        if let Some(held) = self.holder_of(name) {
            let still_read = self.pending.get(&held).copied().unwrap_or(0) > 0;
            if held != node && still_read && self.name_of(held) == name {
                let saved = self.fresh.next_name();
                tracing::debug!(name, saved = %saved, node = %held, "Preserving overwritten value");
                self.out.push(Quadruple::assign(name, saved.as_str()));
                self.holders.insert(saved.clone(), held);
                self.names.insert(held, saved);
            }
        }

        self.holders.insert(name.to_string(), node);
        if primary {
            self.names.insert(node, name.to_string());
        }
    }

    /// Node whose value `name` holds right now
    fn holder_of(&self, name: &str) -> Option<NodeId> {
        if let Some(&node) = self.holders.get(name) {
            return Some(node);
        }
        if is_numeric_literal(name) {
            return None;
        }
        self.table.find_leaf(&Leaf::Ident(name.to_string()))
    }

    /// Operand text for `node`.
    ///
    /// # Panics
    /// Panics if an operator or input node is read before it was emitted;
    /// emission order guarantees it never is.
    fn name_of(&self, node: NodeId) -> &str {
        if let Some(name) = self.names.get(&node) {
            return name;
        }
        match &self.table.node(node).kind {
            NodeKind::Leaf(Leaf::Const(text)) | NodeKind::Leaf(Leaf::Ident(text)) => text,
            _ => panic!("node {node} read before it was materialized"),
        }
    }
}
