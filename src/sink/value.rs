/*!
 * Tagged Argument Values
 * Heterogeneous arguments for print, puts, putc and printf
 *
 * Each variant carries its own stringification rule, so conversion never
 * goes through dynamic dispatch:
 * - `Str` / `Bytes`: verbatim bytes
 * - `Int`: decimal
 * - `Float`: shortest round-trip form (`1.0`, `1.0e+20`, `Infinity`)
 * - `Bool`: `true` / `false`
 * - `Nil`: empty
 * - `List`: inspect form, e.g. `[1, "a", nil]`
 * - `Opaque`: no string form (argument error)
 */

use crate::core::encoding::{decode_leading, leading_char_len};
use crate::core::errors::SinkError;
use crate::core::types::SinkResult;
use crate::format::float::write_shortest;
use std::borrow::Cow;
use std::io::Write as _;

/// A single argument to a variadic sink operation
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Str(&'a str),
    /// Raw bytes with no text encoding
    Bytes(&'a [u8]),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    /// Ordered sequence; `puts` flattens it recursively
    List(Vec<Value<'a>>),
    /// A value with no string representation (named by its type)
    Opaque(&'static str),
}

impl<'a> Value<'a> {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Str(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Bool(true) => "true",
            Value::Bool(false) => "false",
            Value::Nil => "nil",
            Value::List(_) => "Array",
            Value::Opaque(name) => name,
        }
    }

    /// Text-like values (the ones `putc` and `%c` take a character from)
    pub fn as_text(&self) -> Option<&'a [u8]> {
        match *self {
            Value::Str(s) => Some(s.as_bytes()),
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Raw bytes count one character per byte
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// First character of a text value: one UTF-8 sequence for `Str`, one byte for `Bytes`
    ///
    /// `None` for empty text and for values that are not text.
    pub fn leading_char(&self) -> Option<&'a [u8]> {
        match *self {
            Value::Str(s) => {
                let bytes = s.as_bytes();
                let len = leading_char_len(bytes);
                (len > 0).then(|| &bytes[..len])
            }
            Value::Bytes(b) => b.get(..1),
            _ => None,
        }
    }

    /// Default string representation
    ///
    /// Borrowed for text values, rendered for everything else.
    pub fn to_s(&self) -> SinkResult<Cow<'a, [u8]>> {
        if let Some(text) = self.as_text() {
            return Ok(Cow::Borrowed(text));
        }

        let mut out = Vec::new();
        self.write_to_s(&mut out)?;
        Ok(Cow::Owned(out))
    }

    /// Append the default string representation to `out`
    pub fn write_to_s(&self, out: &mut Vec<u8>) -> SinkResult<()> {
        match self {
            Value::Str(s) => out.extend_from_slice(s.as_bytes()),
            Value::Bytes(b) => out.extend_from_slice(b),
            Value::Nil => {}
            Value::List(_) => self.write_inspect(out)?,
            _ => self.write_scalar(out)?,
        }
        Ok(())
    }

    /// Append the inspect representation to `out`
    pub fn write_inspect(&self, out: &mut Vec<u8>) -> SinkResult<()> {
        match self {
            Value::Str(s) => inspect_text(s.as_bytes(), false, out),
            Value::Bytes(b) => inspect_text(b, true, out),
            Value::Nil => out.extend_from_slice(b"nil"),
            Value::List(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.extend_from_slice(b", ");
                    }
                    item.write_inspect(out)?;
                }
                out.push(b']');
            }
            _ => self.write_scalar(out)?,
        }
        Ok(())
    }

    fn write_scalar(&self, out: &mut Vec<u8>) -> SinkResult<()> {
        match *self {
            // Writing into a Vec cannot fail
            Value::Int(i) => {
                let _ = write!(out, "{}", i);
            }
            Value::Float(f) => write_shortest(out, f),
            Value::Bool(b) => out.extend_from_slice(if b { b"true" } else { b"false" }),
            Value::Opaque(name) => {
                return Err(SinkError::argument(format!(
                    "{} has no string representation",
                    name
                )))
            }
            _ => {}
        }
        Ok(())
    }
}

/// Quoted, escaped form of a text value, as the reference stream renders it
///
/// `binary` treats every byte >= 0x80 as opaque (`\xNN`); otherwise valid
/// UTF-8 characters are kept and invalid bytes are escaped.
fn inspect_text(bytes: &[u8], binary: bool, out: &mut Vec<u8>) {
    out.push(b'"');

    let mut rest = bytes;
    while let Some((ch, len)) = decode_leading(rest) {
        let byte = rest[0];
        match ch {
            Some(c) if c.is_ascii() => match byte {
                b'"' => out.extend_from_slice(b"\\\""),
                b'\\' => out.extend_from_slice(b"\\\\"),
                b'\n' => out.extend_from_slice(b"\\n"),
                b'\r' => out.extend_from_slice(b"\\r"),
                b'\t' => out.extend_from_slice(b"\\t"),
                0x0C => out.extend_from_slice(b"\\f"),
                0x0B => out.extend_from_slice(b"\\v"),
                0x08 => out.extend_from_slice(b"\\b"),
                0x07 => out.extend_from_slice(b"\\a"),
                0x1B => out.extend_from_slice(b"\\e"),
                b'#' if matches!(rest.get(1), Some(b'{' | b'$' | b'@')) => {
                    out.extend_from_slice(b"\\#")
                }
                0x7F => out.extend_from_slice(b"\\x7F"),
                0x00..=0x1F if binary => {
                    let _ = write!(out, "\\x{:02X}", byte);
                }
                0x00..=0x1F => {
                    let _ = write!(out, "\\u{:04X}", byte);
                }
                _ => out.push(byte),
            },
            Some(c) if !binary => {
                if c.is_control() {
                    let _ = write!(out, "\\u{:04X}", c as u32);
                } else {
                    out.extend_from_slice(&rest[..len]);
                }
            }
            _ => {
                let end = if binary { 1 } else { len };
                for b in &rest[..end] {
                    let _ = write!(out, "\\x{:02X}", b);
                }
                rest = &rest[end..];
                continue;
            }
        }
        rest = &rest[len..];
    }

    out.push(b'"');
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Str(s.as_str())
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(b: &'a [u8]) -> Self {
        Value::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Value<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Value::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for Value<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Value::Bytes(b.as_slice())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value<'_> {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value<'_> {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value<'_> {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions
///
/// ```
/// use string_sink::{args, Value};
///
/// let list = args!["a", 1, 2.5, ()];
/// assert_eq!(list[1], Value::Int(1));
/// assert_eq!(list[3], Value::Nil);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
