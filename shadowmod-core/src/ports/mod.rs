// shadowmod-core/src/ports/mod.rs

pub mod toolchain;

pub use toolchain::{StepOutput, Toolchain, ToolchainStep};
