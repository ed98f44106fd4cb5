/*!
 * Integer Rendering
 * Decimal and power-of-two radix output for printf
 *
 * Negative values in hex, octal and binary print as an infinite
 * two's-complement string abbreviated with `..` (`-255` → `..f01`) unless a
 * `+` or space flag asks for an explicit sign (`-ff`).
 */

use super::types::{Conversion, Flags};

/// Radix, digit case and alternate-form prefix of an integer conversion
fn radix_of(conversion: Conversion) -> (u32, bool, &'static str) {
    match conversion {
        Conversion::Hex { upper: false } => (16, false, "0x"),
        Conversion::Hex { upper: true } => (16, true, "0X"),
        Conversion::Octal => (8, false, "0"),
        Conversion::Binary { upper: false } => (2, false, "0b"),
        Conversion::Binary { upper: true } => (2, true, "0B"),
        _ => (10, false, ""),
    }
}

#[inline]
fn digit(d: u32, upper: bool) -> u8 {
    let c = char::from_digit(d, 16).unwrap_or('0');
    if upper {
        c.to_ascii_uppercase() as u8
    } else {
        c as u8
    }
}

/// Digits of a non-negative magnitude
fn magnitude_digits(mut n: u128, radix: u32, upper: bool) -> Vec<u8> {
    if n == 0 {
        return vec![b'0'];
    }
    let mut digits = Vec::with_capacity(40);
    while n > 0 {
        digits.push(digit((n % u128::from(radix)) as u32, upper));
        n /= u128::from(radix);
    }
    digits.reverse();
    digits
}

/// Two's-complement digits of a negative value, starting with one fill digit
///
/// `-255` in radix 16 → `f01`; `-1` → `f`.
fn complement_digits(n: i128, radix: u32, upper: bool) -> Vec<u8> {
    let r = i128::from(radix);
    let mut digits = Vec::with_capacity(40);
    let mut v = n;
    while v != -1 {
        digits.push(digit(v.rem_euclid(r) as u32, upper));
        v = v.div_euclid(r);
    }
    digits.push(digit(radix - 1, upper));
    digits.reverse();
    digits
}

/// Append spaces or the body, justified within `width` columns
fn justify(out: &mut Vec<u8>, parts: &[&[u8]], width: usize, left: bool) {
    let len: usize = parts.iter().map(|p| p.len()).sum();
    let pad = width.saturating_sub(len);

    if !left {
        out.resize(out.len() + pad, b' ');
    }
    for part in parts {
        out.extend_from_slice(part);
    }
    if left {
        out.resize(out.len() + pad, b' ');
    }
}

/// Render `n` for an integer conversion
pub fn render(
    out: &mut Vec<u8>,
    n: i128,
    conversion: Conversion,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
) {
    let (radix, upper, alt_prefix) = radix_of(conversion);
    let explicit_sign = flags.plus || flags.space;

    if n < 0 && radix != 10 && !explicit_sign {
        let core = complement_digits(n, radix, upper);
        let fill = core[0];
        let prefix: &[u8] = if flags.alternate && radix != 8 {
            alt_prefix.as_bytes()
        } else {
            b""
        };

        let target = match precision {
            Some(p) => p,
            None if flags.zero && !flags.left => width.saturating_sub(prefix.len()),
            None => 0,
        };
        let body_len = 2 + core.len();
        let mut body = Vec::with_capacity(target.max(body_len));
        body.extend_from_slice(b"..");
        body.resize(2 + target.saturating_sub(body_len), fill);
        body.extend_from_slice(&core);

        justify(out, &[prefix, &body], width, flags.left);
        return;
    }

    let sign: &[u8] = if n < 0 {
        b"-"
    } else if flags.plus {
        b"+"
    } else if flags.space {
        b" "
    } else {
        b""
    };

    let mut digits = magnitude_digits(n.unsigned_abs(), radix, upper);
    if let Some(p) = precision {
        if digits.len() < p {
            let mut padded = vec![b'0'; p - digits.len()];
            padded.extend_from_slice(&digits);
            digits = padded;
        }
    }

    let prefix: &[u8] = match conversion {
        _ if !flags.alternate || n == 0 => b"",
        Conversion::Octal if digits[0] == b'0' => b"",
        _ => alt_prefix.as_bytes(),
    };

    if flags.zero && !flags.left && precision.is_none() {
        let used = sign.len() + prefix.len() + digits.len();
        let zeros = vec![b'0'; width.saturating_sub(used)];
        justify(out, &[sign, prefix, &zeros, &digits], width, false);
    } else {
        justify(out, &[sign, prefix, &digits], width, flags.left);
    }
}
