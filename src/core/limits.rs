/*!
 * Sink Limits and Constants
 *
 * Centralized location for buffer sizing and growth constants.
 *
 * - Performance-critical constants are marked with [PERF]
 * - Values that mirror the reference stream are marked with [COMPAT]
 */

// =============================================================================
// BUFFER SIZING
// =============================================================================

/// Initial capacity of a sink created without a hint
/// Nothing is allocated until the first write
/// [COMPAT] Matches the reference stream, which also starts empty
pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

/// Geometric growth factor applied when the store runs out of room
/// New capacity is `max(capacity * GROWTH_FACTOR, length + requested)`
/// [PERF] Doubling keeps appends amortized O(1)
pub const GROWTH_FACTOR: usize = 2;

/// Hard ceiling on the store size (bytes)
/// Rust allocations can never exceed `isize::MAX` bytes
pub const MAX_SINK_CAPACITY: usize = isize::MAX as usize;

// =============================================================================
// WRITE OPERATIONS
// =============================================================================

/// Line terminator appended by `puts`
pub const LINEFEED: u8 = b'\n';

/// Largest printf scratch allocation kept between calls (64KB)
/// [PERF] Reused to avoid an allocation per printf; larger renders are freed
pub const MAX_RETAINED_SCRATCH: usize = 64 * 1024;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment variable overriding the initial capacity
pub const ENV_INITIAL_CAPACITY: &str = "STRINGSINK_INITIAL_CAPACITY";

/// Environment variable overriding the maximum capacity
pub const ENV_MAX_CAPACITY: &str = "STRINGSINK_MAX_CAPACITY";

/// Environment variable toggling strict printf argument counts
pub const ENV_STRICT_ARITY: &str = "STRINGSINK_STRICT_ARITY";

/// Environment variable enabling JSON trace output
pub const ENV_TRACE_JSON: &str = "STRINGSINK_TRACE_JSON";
