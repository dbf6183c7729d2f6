//! Unit tests for IR (Intermediate Representation) types
//!
//! Tests operation tags, quadruples and block listings shared by front ends
//! and the optimizer

use quadag_core::ir::*;
use quadag_core::CoreError;

// =============================================================================
// Operation Tests
// =============================================================================

#[test]
fn test_operation_tags_round_trip() {
    for op in Operation::ALL {
        let parsed: Operation = op.as_str().parse().unwrap();
        assert_eq!(parsed, op);
    }
}

#[test]
fn test_operation_classes() {
    assert!(Operation::Read.is_io());
    assert!(Operation::Jpc.is_jump());
    assert!(Operation::Write.is_barrier());
    assert!(Operation::Jmp.is_barrier());
    assert!(!Operation::Assign.is_barrier());
}

#[test]
fn test_unknown_operation() {
    let err = "%".parse::<Operation>().unwrap_err();
    assert_eq!(err, CoreError::UnknownOperation("%".to_string()));
}

// =============================================================================
// Quadruple Tests
// =============================================================================

#[test]
fn test_quadruple_json_shape() -> anyhow::Result<()> {
    let quad = Quadruple::new(Operation::Le, "a", "10", "T3");
    let json = serde_json::to_value(&quad)?;

    assert_eq!(json["op"], "<=");
    assert_eq!(json["arg1"], "a");
    assert_eq!(json["arg2"], "10");
    assert_eq!(json["result"], "T3");
    Ok(())
}

#[test]
fn test_quadruple_json_defaults_missing_slots() -> anyhow::Result<()> {
    let quad: Quadruple = serde_json::from_str(r#"{"op": "WRITE", "arg1": "x"}"#)?;
    assert_eq!(quad, Quadruple::new(Operation::Write, "x", "", ""));
    assert_eq!(quad.destination(), None);
    Ok(())
}

#[test]
fn test_quadruple_rejects_unknown_json_tag() {
    let result: Result<Quadruple, _> = serde_json::from_str(r#"{"op": "MOD"}"#);
    assert!(result.is_err());
}

#[test]
fn test_quadruple_assign_shape() {
    let quad = Quadruple::assign("T0", "x");
    assert_eq!(quad.op, Operation::Assign);
    assert_eq!(quad.operand1(), Some("T0"));
    assert_eq!(quad.operand2(), None);
    assert_eq!(quad.destination(), Some("x"));
}

// =============================================================================
// Literal Tests
// =============================================================================

#[test]
fn test_literal_recognition() {
    assert!(is_numeric_literal("42"));
    assert!(is_numeric_literal("-1.5"));
    assert!(is_numeric_literal("2e3"));
    assert!(!is_numeric_literal("x1"));
    assert!(!is_numeric_literal(""));
    assert!(!is_numeric_literal("inf"));
    assert_eq!(parse_numeric_literal("2e3"), Some(2000.0));
}

#[test]
fn test_literal_rendering() {
    assert_eq!(render_number(6.0).as_deref(), Some("6"));
    assert_eq!(render_number(2.5).as_deref(), Some("2.5"));
    assert_eq!(render_number(-0.0).as_deref(), Some("0"));
    assert_eq!(render_number(f64::NAN), None);
}

// =============================================================================
// Block Tests
// =============================================================================

#[test]
fn test_block_parses_numbered_listing() -> anyhow::Result<()> {
    let listing = "\
0: ( READ, _, _, n )
1: ( *, n, 2, T0 )
2: ( WRITE, T0, _, _ )
3: ( JMP, _, _, 9 )
";
    let block: Block = listing.parse()?;

    assert_eq!(block.len(), 4);
    assert_eq!(block.quads[1], Quadruple::new(Operation::Mul, "n", "2", "T0"));
    assert_eq!(block.quads[3].result, "9");
    Ok(())
}

#[test]
fn test_block_numbered_output_parses_back() -> anyhow::Result<()> {
    let block = Block::new(vec![
        Quadruple::new(Operation::Odd, "x", "", "T0"),
        Quadruple::new(Operation::Jpc, "T0", "", "5"),
    ]);

    let reparsed: Block = block.numbered().parse()?;
    assert_eq!(reparsed, block);
    Ok(())
}

#[test]
fn test_block_reports_bad_line() {
    let err = "( +, a, b, c )\n( +, a, b )\n".parse::<Block>().unwrap_err();
    assert!(matches!(err, CoreError::MalformedQuadruple { line: 2, .. }));
}

#[test]
fn test_block_json_is_plain_array() -> anyhow::Result<()> {
    let block: Block = vec![Quadruple::assign("1", "x")].into();
    let json = serde_json::to_string(&block)?;
    assert!(json.starts_with('['));

    let back: Block = serde_json::from_str(&json)?;
    assert_eq!(back, block);
    Ok(())
}
