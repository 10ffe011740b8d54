pub mod error;
pub mod graph;
pub mod overrides;
pub mod ports;
pub mod project;

// Handy re-exports to simplify imports elsewhere
pub use error::DomainError;
pub use overrides::OverrideMap;
