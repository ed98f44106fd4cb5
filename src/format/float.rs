/*!
 * Float Rendering
 * Shortest round-trip `to_s` plus the `%f`, `%e` and `%g` conversions
 *
 * Digit generation is delegated to the standard library, whose `{:e}` and
 * `{:.N}` formatting is exact (shortest round-trip without a precision,
 * correctly rounded with one). This module only lays the digits out.
 */

use std::io::Write as _;

/// Largest decimal exponent printed in positional form by `to_s`
const FIXED_MAX_DECPT: i32 = 16;

/// Smallest decimal exponent printed in positional form by `to_s`
const FIXED_MIN_DECPT: i32 = -3;

/// Digits requested from std formatting; every digit past this is zero
///
/// An f64 has at most 1074 fractional and 767 significant decimal digits,
/// and std formatting rejects precisions above `u16::MAX`.
const MAX_EXACT_DIGITS: usize = 1100;

/// Shortest decimal digits of a finite, non-negative value
///
/// Returns the significant digits (no leading zeros) and the position of the
/// decimal point relative to the first digit (`0.123` has decpt 0, `12.3` has 2).
fn shortest_digits(v: f64) -> (Vec<u8>, i32) {
    let repr = format!("{:e}", v);
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    (digits, exponent + 1)
}

/// Append the default string form of a float
///
/// `1.0`, `0.0001`, `1.0e-05`, `1.0e+16`, `Infinity`, `-Infinity`, `NaN`.
pub fn write_shortest(out: &mut Vec<u8>, v: f64) {
    if v.is_nan() {
        out.extend_from_slice(b"NaN");
        return;
    }
    if v.is_infinite() {
        out.extend_from_slice(if v < 0.0 { b"-Infinity" } else { b"Infinity" });
        return;
    }
    if v.is_sign_negative() {
        out.push(b'-');
    }

    let v = v.abs();
    if v == 0.0 {
        out.extend_from_slice(b"0.0");
        return;
    }

    let (digits, decpt) = shortest_digits(v);

    if decpt > 0 && decpt <= FIXED_MAX_DECPT {
        let split = decpt as usize;
        if digits.len() <= split {
            out.extend_from_slice(&digits);
            out.resize(out.len() + split - digits.len(), b'0');
            out.extend_from_slice(b".0");
        } else {
            out.extend_from_slice(&digits[..split]);
            out.push(b'.');
            out.extend_from_slice(&digits[split..]);
        }
    } else if decpt <= 0 && decpt >= FIXED_MIN_DECPT {
        out.extend_from_slice(b"0.");
        out.resize(out.len() + (-decpt) as usize, b'0');
        out.extend_from_slice(&digits);
    } else {
        out.push(digits[0]);
        out.push(b'.');
        if digits.len() > 1 {
            out.extend_from_slice(&digits[1..]);
        } else {
            out.push(b'0');
        }
        let _ = write!(out, "e{:+03}", decpt - 1);
    }
}

/// Positional notation with `precision` fractional digits (`%f`)
pub fn fixed(v: f64, precision: usize, alternate: bool) -> String {
    let exact = precision.min(MAX_EXACT_DIGITS);
    let mut s = format!("{:.*}", exact, v);
    pad_zeros(&mut s, precision - exact);
    if alternate && precision == 0 {
        s.push('.');
    }
    s
}

/// Split `{:.Ne}` output into mantissa and decimal exponent
fn scientific_parts(v: f64, precision: usize) -> (String, i32) {
    let exact = precision.min(MAX_EXACT_DIGITS);
    let repr = format!("{:.*e}", exact, v);
    let (mut mantissa, exponent) = match repr.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (repr, 0),
    };
    pad_zeros(&mut mantissa, precision - exact);
    (mantissa, exponent)
}

#[inline]
fn pad_zeros(s: &mut String, count: usize) {
    s.extend(std::iter::repeat('0').take(count));
}

/// Exponent notation with `precision` fractional digits (`%e`, `%E`)
pub fn scientific(v: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let (mut mantissa, exponent) = scientific_parts(v, precision);
    if alternate && precision == 0 {
        mantissa.push('.');
    }
    let marker = if upper { 'E' } else { 'e' };
    format!("{}{}{:+03}", mantissa, marker, exponent)
}

/// Shortest of `%e` and `%f` for `precision` significant digits (`%g`, `%G`)
///
/// Trailing zeros are removed unless `alternate` is set.
pub fn general(v: f64, precision: usize, alternate: bool, upper: bool) -> String {
    // Digits past the exact ones are zeros that stripping removes again
    let significant = if alternate {
        precision.max(1)
    } else {
        precision.clamp(1, MAX_EXACT_DIGITS)
    };
    let (_, exponent) = scientific_parts(v, significant - 1);

    let exponent = i64::from(exponent);
    let significant_digits = i64::try_from(significant).unwrap_or(i64::MAX);

    let mut s = if exponent < -4 || exponent >= significant_digits {
        scientific(v, significant - 1, alternate, upper)
    } else {
        // exponent < significant_digits, so this is never negative
        let decimals = usize::try_from(significant_digits - 1 - exponent).unwrap_or(0);
        fixed(v, decimals, alternate)
    };

    if !alternate {
        strip_trailing_zeros(&mut s);
    }
    s
}

fn strip_trailing_zeros(s: &mut String) {
    let mantissa_end = s.find(|c: char| c == 'e' || c == 'E').unwrap_or(s.len());
    let mantissa = &s[..mantissa_end];
    if !mantissa.contains('.') {
        return;
    }

    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    let exponent = s[mantissa_end..].to_string();
    let mut result = String::with_capacity(trimmed.len() + exponent.len());
    result.push_str(trimmed);
    result.push_str(&exponent);
    *s = result;
}
