//! Listing optimization example
//!
//! This example demonstrates:
//! - Parsing a numbered quadruple listing
//! - Loading optimizer options from YAML
//! - Printing the optimized block and its statistics
//!
//! Run with `RUST_LOG=quadag_compiler=trace` to see the DAG dump and every
//! emitted instruction.

use quadag_compiler::{BlockOptimizer, OptimizerOptions};
use quadag_core::Block;

const LISTING: &str = "\
0: ( READ, _, _, n )
1: ( *, 2, 3, T0 )
2: ( +, n, T0, T1 )
3: ( :=, T1, _, x )
4: ( +, n, 6, T2 )
5: ( :=, T2, _, y )
6: ( -, 0, x, T3 )
7: ( WRITE, T3, _, _ )
8: ( <, x, y, T4 )
9: ( JPC, T4, _, 14 )
";

const OPTIONS: &str = "\
enable_constant_folding: true
temp_prefixes: [T, t]
reconstruction_prefix: RT
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Block Optimization Example ===\n");

    let block: Block = LISTING.parse()?;
    println!("Original block ({} instructions):", block.len());
    print!("{}", block.numbered());

    let optimizer = BlockOptimizer::with_options(OptimizerOptions::from_yaml(OPTIONS)?);
    let optimized = optimizer.optimize(block.as_slice())?;

    println!("\nOptimized block ({} instructions):", optimized.quads.len());
    print!("{}", Block::new(optimized.quads).numbered());

    println!("\nStatistics:");
    println!("  Folded: {}", optimized.stats.folded);
    println!("  Shared: {}", optimized.stats.shared);
    println!("  DAG nodes: {}", optimized.stats.nodes);
    println!("  Removed: {}", optimized.stats.removed());

    Ok(())
}
