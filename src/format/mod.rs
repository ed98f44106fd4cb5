/*!
 * Format Module
 * printf-style rendering over tagged values
 *
 * `sprintf` renders a whole format string into a caller-provided buffer.
 * Callers render into scratch space and commit the result only on success,
 * which keeps printf all-or-nothing.
 */

pub mod convert;
pub mod float;
pub mod integer;
pub mod parser;
pub mod types;

pub use parser::Parser;
pub use types::{Conversion, Count, Directive, Flags, FormatError, FormatOptions, Segment};

use crate::core::encoding::{char_boundary, char_count};
use crate::core::errors::SinkError;
use crate::core::limits::MAX_SINK_CAPACITY;
use crate::core::types::{SinkResult, Size};
use crate::sink::Value;
use parser::MAX_COUNT;
use std::io::Write as _;

/// Argument cursor enforcing the numbered/unnumbered rules
struct Arguments<'v, 'a> {
    values: &'v [Value<'a>],
    next: usize,
    sequential: bool,
    numbered: bool,
}

impl<'v, 'a> Arguments<'v, 'a> {
    fn new(values: &'v [Value<'a>]) -> Self {
        Self {
            values,
            next: 0,
            sequential: false,
            numbered: false,
        }
    }

    fn next(&mut self, position: usize) -> Result<&'v Value<'a>, FormatError> {
        if self.numbered {
            return Err(FormatError::MixedNumbering { position });
        }
        self.sequential = true;

        let value = self.values.get(self.next).ok_or(FormatError::TooFewArguments {
            required: self.next + 1,
            supplied: self.values.len(),
        })?;
        self.next += 1;
        Ok(value)
    }

    fn numbered(&mut self, index: usize, position: usize) -> Result<&'v Value<'a>, FormatError> {
        if self.sequential {
            return Err(FormatError::MixedNumbering { position });
        }
        self.numbered = true;

        if index == 0 {
            return Err(FormatError::InvalidArgumentIndex { position });
        }
        self.values.get(index - 1).ok_or(FormatError::TooFewArguments {
            required: index,
            supplied: self.values.len(),
        })
    }

    /// Resolve a `*` width or precision to a signed count
    fn count(&mut self, count: Count, position: usize) -> Result<i128, FormatError> {
        let value = match count {
            Count::Literal(n) => return Ok(n as i128),
            Count::Next => self.next(position)?,
            Count::Numbered(index) => self.numbered(index, position)?,
        };
        match value {
            Value::Int(_) => convert::to_integer(value, '*'),
            other => Err(FormatError::InvalidArgument {
                conversion: '*',
                found: other.type_name().into(),
            }),
        }
    }

    fn finish(&self, options: &FormatOptions) -> Result<(), FormatError> {
        if options.strict_arity && !self.numbered && self.next < self.values.len() {
            return Err(FormatError::TooManyArguments {
                supplied: self.values.len(),
                consumed: self.next,
            });
        }
        Ok(())
    }
}

/// Render `fmt` against `args`, appending the output to `out`
///
/// On error `out` may hold partial output; callers discard it.
pub fn sprintf(
    out: &mut Vec<u8>,
    fmt: &str,
    args: &[Value<'_>],
    options: &FormatOptions,
) -> SinkResult<()> {
    sprintf_bounded(out, fmt, args, options, MAX_SINK_CAPACITY)
}

/// [`sprintf`] that refuses directives padding `out` beyond `limit` bytes
///
/// Width and numeric precision are checked and reserved fallibly before any
/// padding is written.
pub fn sprintf_bounded(
    out: &mut Vec<u8>,
    fmt: &str,
    args: &[Value<'_>],
    options: &FormatOptions,
    limit: Size,
) -> SinkResult<()> {
    let mut arguments = Arguments::new(args);

    for segment in Parser::new(fmt) {
        match segment? {
            Segment::Literal(bytes) => out.extend_from_slice(bytes),
            Segment::Directive(directive) => render(out, &directive, &mut arguments, limit)?,
        }
    }

    arguments.finish(options)?;
    Ok(())
}

fn render(
    out: &mut Vec<u8>,
    directive: &Directive,
    arguments: &mut Arguments<'_, '_>,
    limit: Size,
) -> SinkResult<()> {
    let position = directive.position;
    let mut flags = directive.flags;

    let mut width = 0;
    if let Some(count) = directive.width {
        let w = arguments.count(count, position)?;
        if w < 0 {
            flags.left = true;
        }
        width = clamp_count(w.unsigned_abs(), position)?;
    }

    let mut precision = None;
    if let Some(count) = directive.precision {
        let p = arguments.count(count, position)?;
        // Negative precision means "no precision"
        if p >= 0 {
            precision = Some(clamp_count(p.unsigned_abs(), position)?);
        }
    }

    let value = match directive.argument {
        Some(index) => arguments.numbered(index, position)?,
        None => arguments.next(position)?,
    };

    // Text precision truncates; numeric precision emits digits
    let digits = match directive.conversion {
        Conversion::Str | Conversion::Inspect | Conversion::Char => 0,
        _ => precision.unwrap_or(0),
    };
    reserve_padding(out, width.max(digits), limit)?;

    let letter = directive.letter;
    match directive.conversion {
        conversion @ (Conversion::Decimal
        | Conversion::Hex { .. }
        | Conversion::Octal
        | Conversion::Binary { .. }) => {
            let n = convert::to_integer(value, letter)?;
            integer::render(out, n, conversion, flags, width, precision);
        }
        conversion @ (Conversion::Fixed | Conversion::Exponent { .. } | Conversion::General { .. }) => {
            let v = convert::to_float(value, letter)?;
            render_float(out, v, conversion, flags, width, precision);
        }
        Conversion::Str => {
            let text = value.to_s()?;
            pad_text(out, &text, value.is_binary(), flags.left, width, precision);
        }
        Conversion::Inspect => {
            let mut text = Vec::new();
            value.write_inspect(&mut text)?;
            pad_text(out, &text, false, flags.left, width, precision);
        }
        Conversion::Char => {
            let mut encoded = [0u8; 4];
            let ch: &[u8] = match value.as_text() {
                Some(_) => value.leading_char().ok_or_else(|| FormatError::InvalidArgument {
                    conversion: letter,
                    found: "%c requires a character".into(),
                })?,
                None => {
                    let code = convert::to_integer(value, letter)?;
                    let c = u32::try_from(code)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or_else(|| FormatError::InvalidArgument {
                            conversion: letter,
                            found: format!("invalid character {}", code).into(),
                        })?;
                    c.encode_utf8(&mut encoded).as_bytes()
                }
            };
            pad_text(out, ch, value.is_binary(), flags.left, width, None);
        }
    }
    Ok(())
}

fn clamp_count(n: u128, position: usize) -> Result<usize, FormatError> {
    usize::try_from(n)
        .ok()
        .filter(|&n| n <= MAX_COUNT)
        .ok_or(FormatError::WidthOverflow { position })
}

/// Secure room for `additional` padding bytes without exceeding `limit`
fn reserve_padding(out: &mut Vec<u8>, additional: Size, limit: Size) -> SinkResult<()> {
    let length = out.len();
    if length.saturating_add(additional) > limit {
        return Err(SinkError::CapacityOverflow {
            requested: additional,
            length,
            limit,
        });
    }
    out.try_reserve(additional).map_err(|_| SinkError::Allocation {
        requested: length.saturating_add(additional),
        length,
        capacity: out.capacity(),
    })
}

/// Pad text to `width` characters, truncated to `precision` characters
///
/// Binary text counts one character per byte.
fn pad_text(
    out: &mut Vec<u8>,
    text: &[u8],
    binary: bool,
    left: bool,
    width: usize,
    precision: Option<usize>,
) {
    let text = match precision {
        Some(p) if binary => &text[..p.min(text.len())],
        Some(p) => &text[..char_boundary(text, p)],
        None => text,
    };

    let count = if binary { text.len() } else { char_count(text) };
    let pad = if width > 0 {
        width.saturating_sub(count)
    } else {
        0
    };

    if !left {
        out.resize(out.len() + pad, b' ');
    }
    out.extend_from_slice(text);
    if left {
        out.resize(out.len() + pad, b' ');
    }
}

fn render_float(
    out: &mut Vec<u8>,
    v: f64,
    conversion: Conversion,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
) {
    let sign: &str = if v.is_sign_negative() && !v.is_nan() {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    };

    if !v.is_finite() {
        let body = if v.is_nan() { "NaN" } else { "Inf" };
        let len = sign.len() + body.len();
        let pad = width.saturating_sub(len);
        if !flags.left {
            out.resize(out.len() + pad, b' ');
        }
        let _ = write!(out, "{}{}", sign, body);
        if flags.left {
            out.resize(out.len() + pad, b' ');
        }
        return;
    }

    let precision = precision.unwrap_or(6);
    let magnitude = v.abs();
    let body = match conversion {
        Conversion::Exponent { upper } => float::scientific(magnitude, precision, flags.alternate, upper),
        Conversion::General { upper } => float::general(magnitude, precision, flags.alternate, upper),
        _ => float::fixed(magnitude, precision, flags.alternate),
    };

    let len = sign.len() + body.len();
    let pad = width.saturating_sub(len);
    if flags.left {
        let _ = write!(out, "{}{}", sign, body);
        out.resize(out.len() + pad, b' ');
    } else if flags.zero {
        out.extend_from_slice(sign.as_bytes());
        out.resize(out.len() + pad, b'0');
        out.extend_from_slice(body.as_bytes());
    } else {
        out.resize(out.len() + pad, b' ');
        let _ = write!(out, "{}{}", sign, body);
    }
}
