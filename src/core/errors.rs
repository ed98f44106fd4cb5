/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export FormatError from format module
pub use crate::format::FormatError;

/// Sink errors with serialization support
///
/// Every variant is raised synchronously by the call that caused it, and the
/// failing call leaves the sink's content untouched.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SinkError {
    #[error("Allocation failed: could not grow to {requested} bytes (length {length}, capacity {capacity})")]
    #[diagnostic(
        code(sink::allocation_failed),
        help("The allocator refused the request. Reduce output size or free memory.")
    )]
    Allocation {
        requested: Size,
        length: Size,
        capacity: Size,
    },

    #[error("Sink is too large: appending {requested} bytes to {length} exceeds {limit} bytes")]
    #[diagnostic(
        code(sink::capacity_overflow),
        help("Raise the configured max_capacity or split the output across sinks.")
    )]
    CapacityOverflow {
        requested: Size,
        length: Size,
        limit: Size,
    },

    #[error("Format error: {0}")]
    #[diagnostic(
        code(sink::format),
        help("Check that every directive has a matching argument of a compatible type.")
    )]
    Format(FormatError),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(sink::invalid_argument))]
    Argument(InlineString),
}

impl SinkError {
    /// Build an argument error from a message
    #[inline]
    pub fn argument(message: impl Into<InlineString>) -> Self {
        SinkError::Argument(message.into())
    }

    /// True for both allocator refusals and size overflows
    pub fn is_allocation(&self) -> bool {
        matches!(
            self,
            SinkError::Allocation { .. } | SinkError::CapacityOverflow { .. }
        )
    }

    pub fn is_format(&self) -> bool {
        matches!(self, SinkError::Format(_))
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, SinkError::Argument(_))
    }
}

// Allow conversion from FormatError to SinkError
impl From<FormatError> for SinkError {
    fn from(err: FormatError) -> Self {
        SinkError::Format(err)
    }
}
