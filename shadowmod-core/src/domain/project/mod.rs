// shadowmod-core/src/domain/project/mod.rs

pub mod configuration;
pub mod manifest;
pub use configuration::{ProjectConfig, ToolchainConfig};

pub use manifest::{ManifestLayout, ManifestText};
