/*!
 * Sink Module
 * The string sink, its byte store and the values it accepts
 */

pub mod buffer;
pub mod config;
pub mod traits;
pub mod value;

mod sink;

pub use buffer::Buffer;
pub use config::SinkConfig;
pub use sink::StringSink;
pub use traits::Stream;
pub use value::Value;
