pub mod traits;

// Sink implementations
pub mod memory;
pub mod tracing_sink;
