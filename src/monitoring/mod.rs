/*!
 * Monitoring
 * Structured logging setup for sink diagnostics
 */

mod tracer;

pub use tracer::{init_tracing, try_init_tracing};
