//! Optimizes every block of a JSON document and reports per-block statistics.
//!
//! Usage: `cargo run --example block_stats -- blocks.json`, where the file is
//! an array of blocks, each an array of `{ "op", "arg1", "arg2", "result" }`
//! objects. Without an argument a built-in document is used.

use quadag_compiler::BlockOptimizer;
use quadag_core::Block;

const DOCUMENT: &str = r#"[
  [
    { "op": "+", "arg1": "a", "arg2": "b", "result": "T0" },
    { "op": "+", "arg1": "a", "arg2": "b", "result": "T1" },
    { "op": ":=", "arg1": "T0", "result": "x" },
    { "op": ":=", "arg1": "T1", "result": "y" }
  ],
  [
    { "op": ":=", "arg1": "a", "result": "T0" },
    { "op": ":=", "arg1": "b", "result": "a" },
    { "op": ":=", "arg1": "T0", "result": "b" }
  ]
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DOCUMENT.to_string(),
    };
    let blocks: Vec<Block> = serde_json::from_str(&text)?;

    let optimizer = BlockOptimizer::new();
    for (number, block) in blocks.iter().enumerate() {
        let optimized = optimizer.optimize(block.as_slice())?;
        println!("{}", "-".repeat(60));
        println!("Block {number}: {}", serde_json::to_string(&optimized.stats)?);
        print!("{}", Block::new(optimized.quads));
    }

    Ok(())
}
