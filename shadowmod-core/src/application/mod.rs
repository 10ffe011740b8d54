// shadowmod-core/src/application/mod.rs

pub mod clean;
pub mod error;
pub mod orchestrator;
pub mod resolver;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do:
// `use shadowmod_core::application::{BuildOrchestrator, clean_shadow_artifacts};`
// without knowing the internal file layout.

pub use clean::clean_shadow_artifacts;
pub use error::BuildError;
pub use orchestrator::{BuildOrchestrator, BuildReport, ResolvePlan};
pub use resolver::OverrideResolver;
