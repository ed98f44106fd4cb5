/*!
 * String Sink Library
 * Write-only in-memory byte sink with IO-style write operations
 */

#![cfg_attr(feature = "nightly", feature(core_intrinsics))]

pub mod core;
pub mod format;
pub mod monitoring;
pub mod sink;

// Re-exports
pub use crate::core::errors::{FormatError, SinkError};
pub use crate::core::types::{SinkResult, SinkStats, Size};
pub use format::{sprintf, sprintf_bounded, FormatOptions};
pub use monitoring::init_tracing;
pub use sink::{SinkConfig, Stream, StringSink, Value};
