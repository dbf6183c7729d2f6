//! Numeric literal helpers
//!
//! Operand text is either an identifier, a numeric literal, or empty. A
//! numeric literal is decimal with an optional sign, optional fraction and
//! optional exponent (`12`, `-5`, `2.5`, `.5`, `1e3`, `6.02E-3`).

/// Returns true if `text` is a numeric literal
pub fn is_numeric_literal(text: &str) -> bool {
    parse_numeric_literal(text).is_some()
}

/// Parse a numeric literal, rejecting identifiers, `inf`, `nan` and hex text
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return None;
        }
        pos += exp_digits;
    }

    if pos != bytes.len() {
        return None;
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Render a number as canonical literal text.
///
/// Integral values carry no fractional part (`5`, not `5.0`), other values use
/// the shortest text that parses back to the same number, and negative zero
/// renders as `0`. Non-finite values have no literal form.
pub fn render_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }
    Some(format!("{value}"))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals() {
        for text in ["0", "42", "-5", "+7", "2.5", ".5", "5.", "1e3", "6.02E-3", "-1.5e+2"] {
            assert!(is_numeric_literal(text), "{text} should be numeric");
        }
    }

    #[test]
    fn test_non_numeric_text() {
        for text in ["", "x", "T0", "-", ".", "1e", "1e+", "inf", "nan", "0x10", "1.2.3", "3a", " 3"] {
            assert!(!is_numeric_literal(text), "{text} should not be numeric");
        }
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_numeric_literal("42"), Some(42.0));
        assert_eq!(parse_numeric_literal("-2.5"), Some(-2.5));
        assert_eq!(parse_numeric_literal("1e3"), Some(1000.0));
    }

    #[test]
    fn test_render_strips_fraction() {
        assert_eq!(render_number(5.0).as_deref(), Some("5"));
        assert_eq!(render_number(-5.0).as_deref(), Some("-5"));
        assert_eq!(render_number(2.5).as_deref(), Some("2.5"));
        assert_eq!(render_number(-0.0).as_deref(), Some("0"));
    }

    #[test]
    fn test_render_non_finite() {
        assert_eq!(render_number(f64::INFINITY), None);
        assert_eq!(render_number(f64::NAN), None);
    }
}
