/*!
 * Core Types
 * Common types used across the sink
 */

use serde::{Deserialize, Serialize};

/// Size type for byte counts and capacities
pub type Size = usize;

/// Common result type for sink operations
pub type SinkResult<T> = Result<T, super::errors::SinkError>;

/// Point-in-time view of a sink's storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SinkStats {
    /// Bytes currently holding content
    pub length: Size,
    /// Bytes allocated for the store
    pub capacity: Size,
    /// Number of times the store was reallocated to grow
    pub reallocations: u64,
}

impl SinkStats {
    /// Allocated bytes not yet holding content
    #[inline]
    pub fn spare(&self) -> Size {
        self.capacity - self.length
    }
}
