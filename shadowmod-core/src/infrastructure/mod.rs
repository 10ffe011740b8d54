// shadowmod-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;
pub mod graph;
pub mod locator;
pub mod patcher;

pub use locator::LocalModuleLocator;
pub use patcher::{ManifestPatcher, ShadowManifest};
