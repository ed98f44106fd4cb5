/*!
 * Data Structures
 *
 * Small helper types shared by the sink:
 * - Inline strings for allocation-free error messages
 *
 * # Performance
 *
 * - Inline strings: Avoids heap allocation for strings ≤23 bytes
 */

mod inline_string;

pub use inline_string::InlineString;
