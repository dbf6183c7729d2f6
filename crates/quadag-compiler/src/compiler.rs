//! Block optimizer
//!
//! Provides the entry point that optimizes one basic block: the builder runs
//! once over the input, the reconstructor once over what the builder leaves.

use crate::error::{OptimizeError, Result};
use crate::optimizer::{BlockBuilder, Reconstructor, TempNaming};
use quadag_core::ir::is_numeric_literal;
use quadag_core::{Block, Quadruple};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Optimizer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerOptions {
    /// Enable constant folding
    pub enable_constant_folding: bool,
    /// Prefixes of front-end temporaries (`T` in `T0`, `T1`, ...)
    pub temp_prefixes: Vec<String>,
    /// Prefix of temporaries synthesized during reconstruction
    pub reconstruction_prefix: String,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            enable_constant_folding: true,
            temp_prefixes: vec!["T".to_string(), "t".to_string()],
            reconstruction_prefix: "RT".to_string(),
        }
    }
}

impl OptimizerOptions {
    /// Load options from YAML; missing keys keep their defaults
    pub fn from_yaml(text: &str) -> Result<Self> {
        let options: Self =
            serde_yaml::from_str(text).map_err(|e| OptimizeError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from JSON; missing keys keep their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(text).map_err(|e| OptimizeError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every prefix can name a temporary
    pub fn validate(&self) -> Result<()> {
        if self.reconstruction_prefix.is_empty() {
            return Err(OptimizeError::Config(
                "reconstruction_prefix must not be empty".to_string(),
            ));
        }
        if self.temp_prefixes.iter().any(String::is_empty) {
            return Err(OptimizeError::Config(
                "temp_prefixes must not contain an empty prefix".to_string(),
            ));
        }
        Ok(())
    }

    /// Temporary naming policy for these options
    pub fn naming(&self) -> TempNaming {
        TempNaming::new(
            self.temp_prefixes.clone(),
            self.reconstruction_prefix.clone(),
        )
    }
}

/// Counters describing one optimized block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizationStats {
    /// Input instruction count
    pub original: usize,
    /// Output instruction count
    pub optimized: usize,
    /// Operations folded into literals
    pub folded: usize,
    /// Operations answered by an existing node
    pub shared: usize,
    /// DAG nodes built
    pub nodes: usize,
}

impl OptimizationStats {
    /// Instructions saved, zero if the output grew
    pub fn removed(&self) -> usize {
        self.original.saturating_sub(self.optimized)
    }
}

/// Result of optimizing one block
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized {
    pub quads: Vec<Quadruple>,
    pub stats: OptimizationStats,
}

/// The DAG block optimizer
#[derive(Debug, Clone)]
pub struct BlockOptimizer {
    /// Optimizer options
    options: OptimizerOptions,
    /// Temporary naming derived from the options
    naming: TempNaming,
}

impl BlockOptimizer {
    /// Create a new optimizer with default options
    pub fn new() -> Self {
        Self::with_options(OptimizerOptions::default())
    }

    /// Create a new optimizer with custom options
    pub fn with_options(options: OptimizerOptions) -> Self {
        let naming = options.naming();
        Self { options, naming }
    }

    /// Get the optimizer options
    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    /// Optimize one basic block.
    ///
    /// Every call starts from an empty DAG; nothing carries over between
    /// blocks. Structural errors name the offending instruction index.
    pub fn optimize(&self, quads: &[Quadruple]) -> Result<Optimized> {
        let built = BlockBuilder::new(self.options.enable_constant_folding).build(quads)?;
        tracing::trace!(dag = %built.table, "Built block DAG");

        let reserved: HashSet<String> = quads
            .iter()
            .flat_map(|quad| [&quad.arg1, &quad.arg2, &quad.result])
            .filter(|name| !name.is_empty() && !is_numeric_literal(name))
            .cloned()
            .collect();

        let optimized = Reconstructor::new(&built.table, &self.naming, reserved).run(&built);

        let stats = OptimizationStats {
            original: quads.len(),
            optimized: optimized.len(),
            folded: built.table.folded(),
            shared: built.table.shared(),
            nodes: built.table.len(),
        };
        tracing::debug!(
            original = stats.original,
            optimized = stats.optimized,
            folded = stats.folded,
            shared = stats.shared,
            nodes = stats.nodes,
            "Optimized block"
        );

        Ok(Optimized {
            quads: optimized,
            stats,
        })
    }

    /// Optimize a block listing
    pub fn optimize_block(&self, block: &Block) -> Result<Block> {
        self.optimize(block.as_slice())
            .map(|optimized| Block::new(optimized.quads))
    }
}

impl Default for BlockOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
