/*!
 * Core Module
 * Fundamental sink types, limits and error handling
 */

pub mod data_structures;
pub mod encoding;
pub mod errors;
pub mod hints;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use data_structures::InlineString;
pub use errors::*;
pub use hints::*;
pub use types::*;
