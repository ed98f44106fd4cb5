/*!
 * Buffer Core
 * Contiguous growable byte store with an explicit growth policy
 */

use crate::core::errors::SinkError;
use crate::core::hints::{likely, unlikely};
use crate::core::limits::{GROWTH_FACTOR, MAX_SINK_CAPACITY};
use crate::core::types::{SinkResult, SinkStats, Size};
use tracing::{debug, trace, warn};

/// Owned byte store tracking length, capacity and growth events
///
/// Growth is geometric: when a request does not fit, capacity becomes
/// `max(capacity * 2, length + requested)`, capped at `max_capacity`.
/// Growth is attempted with `try_reserve_exact`, so a refused allocation
/// leaves the content untouched.
#[derive(Clone)]
pub struct Buffer {
    store: Vec<u8>,
    max_capacity: Size,
    reallocations: u64,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            store: Vec::new(),
            max_capacity: MAX_SINK_CAPACITY,
            reallocations: 0,
        }
    }

    /// Buffer pre-sized for `capacity` bytes when the allocator allows it
    ///
    /// The size is a hint: a refused reservation leaves the store empty and
    /// growth happens on demand. Use [`with_limits`](Self::with_limits) to
    /// treat a failed reservation as an error.
    pub fn with_capacity(capacity: Size) -> Self {
        let mut store = Vec::new();
        if let Err(err) = store.try_reserve_exact(capacity.min(MAX_SINK_CAPACITY)) {
            warn!(capacity, error = %err, "Ignoring unsatisfiable capacity hint");
        }

        Self {
            store,
            max_capacity: MAX_SINK_CAPACITY,
            reallocations: 0,
        }
    }

    /// Buffer with a fallible initial reservation and a size ceiling
    pub fn with_limits(initial_capacity: Size, max_capacity: Size) -> SinkResult<Self> {
        let max_capacity = max_capacity.min(MAX_SINK_CAPACITY);
        if initial_capacity > max_capacity {
            return Err(SinkError::CapacityOverflow {
                requested: initial_capacity,
                length: 0,
                limit: max_capacity,
            });
        }

        let mut store = Vec::new();
        store
            .try_reserve_exact(initial_capacity)
            .map_err(|_| SinkError::Allocation {
                requested: initial_capacity,
                length: 0,
                capacity: 0,
            })?;

        Ok(Self {
            store,
            max_capacity,
            reallocations: 0,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> Size {
        self.store.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> Size {
        self.store.capacity()
    }

    #[inline]
    pub fn max_capacity(&self) -> Size {
        self.max_capacity
    }

    /// Bounded view of the content, valid until the next mutation
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.store
    }

    pub fn stats(&self) -> SinkStats {
        SinkStats {
            length: self.len(),
            capacity: self.capacity(),
            reallocations: self.reallocations,
        }
    }

    /// Guarantee room for `additional` more bytes without reallocating
    pub fn ensure_capacity(&mut self, additional: Size) -> SinkResult<()> {
        let length = self.store.len();
        let capacity = self.store.capacity();

        let required = length
            .checked_add(additional)
            .filter(|&required| required <= self.max_capacity)
            .ok_or(SinkError::CapacityOverflow {
                requested: additional,
                length,
                limit: self.max_capacity,
            })?;

        if likely(required <= capacity) {
            return Ok(());
        }

        let target = if capacity > self.max_capacity / GROWTH_FACTOR {
            self.max_capacity
        } else {
            (capacity * GROWTH_FACTOR).max(required)
        };

        self.store
            .try_reserve_exact(target - length)
            .map_err(|_| SinkError::Allocation {
                requested: target,
                length,
                capacity,
            })?;
        self.reallocations += 1;

        trace!(
            old_capacity = capacity,
            new_capacity = self.store.capacity(),
            length,
            "Grew sink buffer"
        );
        Ok(())
    }

    /// Copy `data` onto the tail, returning the number of bytes appended
    #[inline]
    pub fn append_bytes(&mut self, data: &[u8]) -> SinkResult<Size> {
        if unlikely(data.is_empty()) {
            return Ok(0);
        }
        self.ensure_capacity(data.len())?;
        self.store.extend_from_slice(data);
        Ok(data.len())
    }

    #[inline]
    pub fn push_byte(&mut self, byte: u8) -> SinkResult<()> {
        self.ensure_capacity(1)?;
        self.store.push(byte);
        Ok(())
    }

    /// Append several pieces as one all-or-nothing operation
    ///
    /// Capacity for the whole batch is secured before the first copy.
    pub fn append_all<P: AsRef<[u8]>>(&mut self, pieces: &[P]) -> SinkResult<Size> {
        let growth = pieces
            .iter()
            .try_fold(0usize, |total, piece| total.checked_add(piece.as_ref().len()))
            .ok_or(SinkError::CapacityOverflow {
                requested: Size::MAX,
                length: self.len(),
                limit: self.max_capacity,
            })?;

        self.ensure_capacity(growth)?;
        for piece in pieces {
            self.store.extend_from_slice(piece.as_ref());
        }
        Ok(growth)
    }

    /// Release spare capacity so that `capacity == length`
    pub fn shrink(&mut self) {
        let before = self.store.capacity();
        self.store.shrink_to_fit();
        debug!(
            old_capacity = before,
            new_capacity = self.store.capacity(),
            "Shrank sink buffer"
        );
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.store
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("length", &self.len())
            .field("capacity", &self.capacity())
            .field("max_capacity", &self.max_capacity)
            .field("reallocations", &self.reallocations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let buffer = Buffer::new();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_append_and_grow() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.append_bytes(b"hello").unwrap(), 5);
        assert!(buffer.capacity() >= 5);
        assert_eq!(buffer.as_slice(), b"hello");
        assert_eq!(buffer.stats().reallocations, 1);
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.append_bytes(b"").unwrap(), 0);
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.stats().reallocations, 0);
    }

    #[test]
    fn test_growth_policy_doubles() {
        let mut buffer = Buffer::with_capacity(16);
        buffer.append_bytes(&[1; 16]).unwrap();
        let before = buffer.capacity();

        buffer.append_bytes(&[2]).unwrap();
        assert!(buffer.capacity() >= before * 2);
        assert_eq!(buffer.len(), 17);
    }

    #[test]
    fn test_growth_policy_large_request() {
        let mut buffer = Buffer::with_capacity(4);
        buffer.append_bytes(b"ab").unwrap();
        buffer.append_bytes(&[0; 100]).unwrap();
        assert!(buffer.capacity() >= 102);
        assert_eq!(buffer.len(), 102);
    }

    #[test]
    fn test_ensure_capacity_reserves_room() {
        let mut buffer = Buffer::new();
        buffer.ensure_capacity(1000).unwrap();
        let capacity = buffer.capacity();
        assert!(capacity >= 1000);

        buffer.append_bytes(&[0; 1000]).unwrap();
        assert_eq!(buffer.capacity(), capacity);
        assert_eq!(buffer.stats().reallocations, 1);
    }

    #[test]
    fn test_max_capacity_enforced() {
        let mut buffer = Buffer::with_limits(0, 8).unwrap();
        buffer.append_bytes(b"12345678").unwrap();

        let err = buffer.append_bytes(b"9").unwrap_err();
        assert!(matches!(err, SinkError::CapacityOverflow { requested: 1, length: 8, limit: 8 }));
        assert_eq!(buffer.as_slice(), b"12345678");
    }

    #[test]
    fn test_growth_capped_at_limit() {
        let mut buffer = Buffer::with_limits(6, 10).unwrap();
        buffer.append_bytes(b"123456").unwrap();
        buffer.append_bytes(b"7").unwrap();
        assert!(buffer.capacity() >= 7);
        assert!(buffer.len() <= buffer.max_capacity());
    }

    #[test]
    fn test_overflow_leaves_content() {
        let mut buffer = Buffer::new();
        buffer.append_bytes(b"keep").unwrap();

        let err = buffer.ensure_capacity(usize::MAX).unwrap_err();
        assert!(err.is_allocation());
        assert_eq!(buffer.as_slice(), b"keep");
    }

    #[test]
    fn test_allocation_failure_leaves_content() {
        let mut buffer = Buffer::new();
        buffer.append_bytes(b"keep").unwrap();

        // Within the isize::MAX ceiling but far beyond any real allocator
        let err = buffer.ensure_capacity(MAX_SINK_CAPACITY / 2).unwrap_err();
        assert!(matches!(err, SinkError::Allocation { .. }));
        assert_eq!(buffer.as_slice(), b"keep");
    }

    #[test]
    fn test_append_all_is_atomic() {
        let mut buffer = Buffer::with_limits(0, 5).unwrap();
        let err = buffer.append_all(&[&b"abc"[..], &b"def"[..]]).unwrap_err();
        assert!(err.is_allocation());
        assert!(buffer.is_empty());

        assert_eq!(buffer.append_all(&[&b"ab"[..], &b"cd"[..]]).unwrap(), 4);
        assert_eq!(buffer.as_slice(), b"abcd");
    }

    #[test]
    fn test_shrink() {
        let mut buffer = Buffer::with_capacity(1024);
        buffer.append_bytes(b"tiny").unwrap();
        buffer.shrink();
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.as_slice(), b"tiny");
    }

    #[test]
    fn test_capacity_hint_is_best_effort() {
        let mut buffer = Buffer::with_capacity(usize::MAX / 4);
        assert_eq!(buffer.capacity(), 0);

        buffer.append_bytes(b"still usable").unwrap();
        assert_eq!(buffer.as_slice(), b"still usable");

        let buffer = Buffer::with_capacity(64);
        assert!(buffer.capacity() >= 64);
    }

    #[test]
    fn test_with_limits_rejects_inverted_bounds() {
        assert!(Buffer::with_limits(16, 8).unwrap_err().is_allocation());
    }
}
