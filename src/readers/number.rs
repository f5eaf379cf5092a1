use super::NUMBER;
use crate::descriptor::{ArgValue, ReadContext, TypeReader};
use crate::error::ReaderError;
use async_trait::async_trait;

/// Reads a number.
///
/// Accepted forms: signed decimals with optional fraction and exponent
/// (`-2.5e1`, `.5`, `+3`), unsigned radix literals (`0x1f`, `0b101`, `0o17`),
/// and exactly `Infinity` with an optional sign. Other words such as `inf` or
/// `nan` are rejected so a fallback reader can take them.
pub struct NumberReader;

#[async_trait]
impl TypeReader for NumberReader {
    fn name(&self) -> &str {
        NUMBER
    }

    async fn read(&self, token: &str, _: &ReadContext<'_>) -> Result<ArgValue, ReaderError> {
        if token.is_empty() {
            return Err(ReaderError::NoInput);
        }
        parse_number(token)
            .map(ArgValue::Number)
            .ok_or_else(|| ReaderError::invalid("not a number"))
    }
}

fn parse_number(token: &str) -> Option<f64> {
    match token {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix(token) {
        return Some(n);
    }

    // Rust's float grammar also takes `inf` and `nan`; letters other than the
    // exponent marker are never part of a decimal here.
    let decimal = token
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if !decimal {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn parse_radix(token: &str) -> Option<f64> {
    let (radix, digits) = match token.get(..2)? {
        "0x" | "0X" => (16, &token[2..]),
        "0b" | "0B" => (2, &token[2..]),
        "0o" | "0O" => (8, &token[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_forms() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-2.5e1"), Some(-25.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("+3"), Some(3.0));
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("1-2"), None);
    }

    #[test]
    fn only_exact_infinity_is_a_word() {
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        for word in ["inf", "infinity", "-INF", "INFINITY", "NaN", "nan"] {
            assert_eq!(parse_number(word), None, "{word}");
        }
    }

    #[test]
    fn radix_literals() {
        assert_eq!(parse_number("0x10"), Some(16.0));
        assert_eq!(parse_number("0XfF"), Some(255.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("0b2"), None);
        assert_eq!(parse_number("-0x10"), None);
        assert_eq!(parse_number("0x+1"), None);
    }
}
