pub mod traits;

// Upstream API implementations
pub mod plasma;
