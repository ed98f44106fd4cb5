/*!
 * Argument Conversion
 * Coerces tagged values into the numeric types printf conversions need
 */

use super::types::FormatError;
use crate::sink::Value;

/// Floats at or beyond this magnitude do not fit an `i128`
const I128_LIMIT: f64 = 1.7014118346046923e38;

fn invalid(conversion: char, found: impl Into<crate::core::InlineString>) -> FormatError {
    FormatError::InvalidArgument {
        conversion,
        found: found.into(),
    }
}

fn describe_text(text: &[u8]) -> String {
    format!("{:?}", String::from_utf8_lossy(text))
}

/// Integer value for `%d`, `%x`, `%o`, `%b`, `%c` and `*`
///
/// Floats are truncated toward zero; strings must hold an integer literal.
pub fn to_integer(value: &Value<'_>, conversion: char) -> Result<i128, FormatError> {
    match *value {
        Value::Int(i) => Ok(i128::from(i)),
        Value::Float(f) if f.is_nan() => Err(invalid(conversion, "NaN")),
        Value::Float(f) if f.abs() >= I128_LIMIT => Err(invalid(conversion, "float out of range")),
        Value::Float(f) => Ok(f.trunc() as i128),
        Value::Str(_) | Value::Bytes(_) => {
            let text = value.as_text().unwrap_or_default();
            parse_integer(text).ok_or_else(|| invalid(conversion, describe_text(text)))
        }
        _ => Err(invalid(conversion, value.type_name())),
    }
}

/// Float value for `%f`, `%e` and `%g`
pub fn to_float(value: &Value<'_>, conversion: char) -> Result<f64, FormatError> {
    match *value {
        Value::Float(f) => Ok(f),
        Value::Int(i) => Ok(i as f64),
        Value::Str(_) | Value::Bytes(_) => {
            let text = value.as_text().unwrap_or_default();
            parse_float(text).ok_or_else(|| invalid(conversion, describe_text(text)))
        }
        _ => Err(invalid(conversion, value.type_name())),
    }
}

/// Remove single underscores between digits; `None` for misplaced underscores
fn strip_separators(digits: &str, radix: u32) -> Option<String> {
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    Some(cleaned)
}

/// Strict integer literal: optional sign, optional radix prefix, digits
///
/// `"42"`, `" -7 "`, `"0x1f"`, `"0b101"`, `"0o17"`, `"017"` (octal), `"1_000"`.
pub fn parse_integer(text: &[u8]) -> Option<i128> {
    let text = std::str::from_utf8(text).ok()?.trim();

    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let lower = body.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0d") {
        (10, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    let digits = strip_separators(digits, radix)?;
    let magnitude = i128::from_str_radix(&digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Strict decimal float literal (no `inf`/`nan` spellings)
pub fn parse_float(text: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(text).ok()?.trim();
    if text.is_empty()
        || text
            .chars()
            .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    if text.starts_with('_') || text.ends_with('_') || text.contains("__") {
        return None;
    }
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literals() {
        assert_eq!(parse_integer(b"42"), Some(42));
        assert_eq!(parse_integer(b"  -7\n"), Some(-7));
        assert_eq!(parse_integer(b"+0x1F"), Some(31));
        assert_eq!(parse_integer(b"0b101"), Some(5));
        assert_eq!(parse_integer(b"017"), Some(15));
        assert_eq!(parse_integer(b"0"), Some(0));
        assert_eq!(parse_integer(b"1_000_000"), Some(1_000_000));
    }

    #[test]
    fn test_integer_rejects() {
        assert_eq!(parse_integer(b""), None);
        assert_eq!(parse_integer(b"abc"), None);
        assert_eq!(parse_integer(b"12abc"), None);
        assert_eq!(parse_integer(b"1__0"), None);
        assert_eq!(parse_integer(b"_1"), None);
        assert_eq!(parse_integer(b"09"), None);
        assert_eq!(parse_integer(b"0x"), None);
        assert_eq!(parse_integer(&[0xFF]), None);
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(parse_float(b"1.5"), Some(1.5));
        assert_eq!(parse_float(b" -2e3 "), Some(-2000.0));
        assert_eq!(parse_float(b"1_000.5"), Some(1000.5));
        assert_eq!(parse_float(b"inf"), None);
        assert_eq!(parse_float(b"NaN"), None);
        assert_eq!(parse_float(b"1.5x"), None);
    }

    #[test]
    fn test_value_coercion() {
        assert_eq!(to_integer(&Value::Float(-3.99), 'd'), Ok(-3));
        assert_eq!(to_integer(&Value::Str("12"), 'd'), Ok(12));
        assert_eq!(to_float(&Value::Int(3), 'f'), Ok(3.0));

        let err = to_integer(&Value::Nil, 'd').unwrap_err();
        assert_eq!(err.to_string(), "invalid value for %d: nil");

        let err = to_integer(&Value::Str("abc"), 'x').unwrap_err();
        assert_eq!(err.to_string(), "invalid value for %x: \"abc\"");

        assert!(to_integer(&Value::Float(f64::NAN), 'd').is_err());
        assert!(to_integer(&Value::Float(f64::INFINITY), 'd').is_err());
        assert!(to_float(&Value::List(vec![]), 'f').is_err());
    }
}
