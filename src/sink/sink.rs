/*!
 * String Sink
 * Write operations and materialization over the buffer core
 */

use super::buffer::Buffer;
use super::config::SinkConfig;
use super::traits::Stream;
use super::value::Value;
use crate::core::errors::SinkError;
use crate::core::limits::{LINEFEED, MAX_RETAINED_SCRATCH};
use crate::core::types::{SinkResult, SinkStats, Size};
use crate::format::{self, FormatOptions};
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;
use std::io;

const NEWLINE: &[u8] = &[LINEFEED];

/// Write-only in-memory byte sink
///
/// Accumulates appended bytes in one contiguous store and hands the content
/// back on demand. Not internally synchronized: share it across threads only
/// behind external locking.
///
/// Materialization comes in two flavors:
/// - [`string`](Self::string) returns an independent [`Bytes`] copy that later
///   writes never affect.
/// - [`as_bytes`](Self::as_bytes) borrows the live store; the borrow ends
///   before the next mutating call can start.
///
/// # Examples
///
/// ```
/// use string_sink::{args, StringSink};
///
/// let mut sink = StringSink::new();
/// sink.append("a")?.append("b")?;
/// sink.puts(&args!["c", vec!["d", "e\n"]])?;
/// sink.printf("%05.1f|%x\n", &args![3.14159, 255])?;
///
/// assert_eq!(sink.string(), "abc\nd\ne\n003.1|ff\n");
/// # Ok::<(), string_sink::SinkError>(())
/// ```
#[derive(Clone, Default)]
pub struct StringSink {
    buffer: Buffer,
    /// Reused render space for printf
    scratch: Vec<u8>,
    format: FormatOptions,
}

impl StringSink {
    /// Crate version
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Empty sink; nothing is allocated until the first write
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sink with room for `capacity` bytes
    ///
    /// The capacity is a hint; an unsatisfiable one yields an empty store.
    pub fn with_capacity(capacity: Size) -> Self {
        Self {
            buffer: Buffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn with_config(config: SinkConfig) -> SinkResult<Self> {
        config.validate()?;
        Ok(Self {
            buffer: Buffer::with_limits(config.initial_capacity, config.max_capacity)?,
            scratch: Vec::new(),
            format: config.format,
        })
    }

    // =========================================================================
    // Write operations
    // =========================================================================

    /// Append the raw bytes of `data`, returning the byte count
    ///
    /// Text is treated as an opaque byte run: a 4-byte character counts as 4.
    #[inline]
    pub fn write(&mut self, data: impl AsRef<[u8]>) -> SinkResult<Size> {
        self.buffer.append_bytes(data.as_ref())
    }

    /// Same effect as [`write`](Self::write), returning the sink for chaining
    #[inline]
    pub fn append(&mut self, data: impl AsRef<[u8]>) -> SinkResult<&mut Self> {
        self.buffer.append_bytes(data.as_ref())?;
        Ok(self)
    }

    /// Append one byte or one character, returning the argument unchanged
    ///
    /// - Integers append the low byte (`321` appends `65`, `-1` appends `255`).
    /// - Floats are truncated toward zero first.
    /// - Strings append their first character (all of its bytes); raw bytes
    ///   append their first byte. Empty text is an argument error.
    pub fn putc<'a>(&mut self, value: impl Into<Value<'a>>) -> SinkResult<Value<'a>> {
        let value = value.into();

        match value {
            // Truncation to the low byte is the contract
            Value::Int(i) => self.buffer.push_byte(i as u8)?,
            Value::Float(f) if f.is_finite() => self.buffer.push_byte(f.trunc() as i64 as u8)?,
            Value::Float(f) => {
                return Err(SinkError::argument(format!("putc cannot take {}", f)));
            }
            Value::Str(_) | Value::Bytes(_) => {
                let ch = value
                    .leading_char()
                    .ok_or_else(|| SinkError::argument("putc requires a non-empty string"))?;
                self.buffer.append_bytes(ch)?;
            }
            _ => {
                return Err(SinkError::argument(format!(
                    "no implicit conversion of {} into Integer",
                    value.type_name()
                )));
            }
        }

        Ok(value)
    }

    /// Append the string form of each argument, in order, with no separator
    pub fn print(&mut self, args: &[Value<'_>]) -> SinkResult<()> {
        let pieces = args
            .iter()
            .map(Value::to_s)
            .collect::<SinkResult<Vec<_>>>()?;
        self.buffer.append_all(&pieces)?;
        Ok(())
    }

    /// Append each argument followed by a newline unless it already ends in one
    ///
    /// Lists are flattened recursively, each leaf terminated on its own. No
    /// arguments (or an empty list) append a single newline.
    pub fn puts(&mut self, args: &[Value<'_>]) -> SinkResult<()> {
        match args {
            [] => self.buffer.push_byte(LINEFEED),
            [Value::Str(line)] => self.puts_line(line.as_bytes()),
            _ => {
                let mut pieces = Vec::with_capacity(args.len() * 2);
                for arg in args {
                    collect_lines(arg, &mut pieces)?;
                }
                self.buffer.append_all(&pieces)?;
                Ok(())
            }
        }
    }

    #[inline]
    fn puts_line(&mut self, line: &[u8]) -> SinkResult<()> {
        if line.last() == Some(&LINEFEED) {
            self.buffer.append_bytes(line)?;
        } else {
            self.buffer.append_all(&[line, NEWLINE])?;
        }
        Ok(())
    }

    /// Append `fmt` rendered against `args`
    ///
    /// Nothing is appended if rendering fails.
    pub fn printf(&mut self, fmt: &str, args: &[Value<'_>]) -> SinkResult<()> {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();

        let room = self.buffer.max_capacity().saturating_sub(self.buffer.len());
        let result = format::sprintf_bounded(&mut scratch, fmt, args, &self.format, room)
            .and_then(|()| self.buffer.append_bytes(&scratch).map(drop));

        if scratch.capacity() <= MAX_RETAINED_SCRATCH {
            self.scratch = scratch;
        }
        result
    }

    // =========================================================================
    // Materialization
    // =========================================================================

    /// Independent snapshot of the content
    pub fn string(&self) -> Bytes {
        Bytes::copy_from_slice(self.buffer.as_slice())
    }

    /// Alias of [`string`](Self::string)
    pub fn to_s(&self) -> Bytes {
        self.string()
    }

    /// Borrowed view of the content, valid until the next mutation
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Content as text, if it is valid UTF-8
    pub fn to_str(&self) -> SinkResult<&str> {
        std::str::from_utf8(self.as_bytes())
            .map_err(|e| SinkError::argument(format!("content is not valid UTF-8: {}", e)))
    }

    /// Content as text, invalid sequences replaced with U+FFFD
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Consume the sink, handing over the store without copying
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buffer.into_vec())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer.into_vec()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of bytes written so far
    #[inline]
    pub fn size(&self) -> Size {
        self.buffer.len()
    }

    #[inline]
    pub fn len(&self) -> Size {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.buffer.capacity()
    }

    pub fn stats(&self) -> SinkStats {
        self.buffer.stats()
    }

    pub fn format_options(&self) -> FormatOptions {
        self.format
    }

    pub fn set_format_options(&mut self, options: FormatOptions) {
        self.format = options;
    }

    /// Reallocate the store down to exactly the content length
    pub fn shrink(&mut self) -> &mut Self {
        self.buffer.shrink();
        self.scratch = Vec::new();
        self
    }
}

/// Flatten one puts argument into output pieces
fn collect_lines<'a>(value: &Value<'a>, pieces: &mut Vec<Cow<'a, [u8]>>) -> SinkResult<()> {
    match value {
        Value::List(items) if items.is_empty() => pieces.push(Cow::Borrowed(NEWLINE)),
        Value::List(items) => {
            for item in items {
                collect_lines(item, pieces)?;
            }
        }
        _ => {
            let text = value.to_s()?;
            let terminated = text.last() == Some(&LINEFEED);
            pieces.push(text);
            if !terminated {
                pieces.push(Cow::Borrowed(NEWLINE));
            }
        }
    }
    Ok(())
}

impl Stream for StringSink {
    fn write(&mut self, data: &[u8]) -> SinkResult<Size> {
        StringSink::write(self, data)
    }

    fn append(&mut self, data: &[u8]) -> SinkResult<&mut Self> {
        StringSink::append(self, data)
    }

    fn putc<'a>(&mut self, value: Value<'a>) -> SinkResult<Value<'a>> {
        StringSink::putc(self, value)
    }

    fn print(&mut self, args: &[Value<'_>]) -> SinkResult<()> {
        StringSink::print(self, args)
    }

    fn puts(&mut self, args: &[Value<'_>]) -> SinkResult<()> {
        StringSink::puts(self, args)
    }

    fn printf(&mut self, fmt: &str, args: &[Value<'_>]) -> SinkResult<()> {
        StringSink::printf(self, fmt, args)
    }

    fn string(&self) -> Bytes {
        StringSink::string(self)
    }
}

impl io::Write for StringSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .append_bytes(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for StringSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer
            .append_bytes(s.as_bytes())
            .map(drop)
            .map_err(|_| fmt::Error)
    }
}

impl fmt::Debug for StringSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringSink")
            .field("length", &self.len())
            .field("capacity", &self.capacity())
            .field("format", &self.format)
            .finish()
    }
}

impl fmt::Display for StringSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
