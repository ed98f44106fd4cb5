/*!
 * Stream Capability
 * The operation set a sink shares with a reference output stream
 */

use super::value::Value;
use crate::core::types::{SinkResult, Size};
use bytes::Bytes;

/// Write-only text stream capabilities
///
/// Anything implementing this trait can stand in for the reference stream:
/// conformance is checked by running the same call sequence against two
/// implementations and comparing return values and content, not by type
/// relationships.
pub trait Stream {
    /// Append raw bytes, returning the byte count
    fn write(&mut self, data: &[u8]) -> SinkResult<Size>;

    /// Append raw bytes, returning the stream for chaining
    fn append(&mut self, data: &[u8]) -> SinkResult<&mut Self>;

    /// Append one byte (integers) or one character (strings), returning the argument
    fn putc<'a>(&mut self, value: Value<'a>) -> SinkResult<Value<'a>>;

    /// Append the string form of every argument, without separators
    fn print(&mut self, args: &[Value<'_>]) -> SinkResult<()>;

    /// Append every argument as a newline-terminated line, flattening lists
    fn puts(&mut self, args: &[Value<'_>]) -> SinkResult<()>;

    /// Append the rendered format string
    fn printf(&mut self, fmt: &str, args: &[Value<'_>]) -> SinkResult<()>;

    /// Snapshot of everything written so far
    fn string(&self) -> Bytes;
}
