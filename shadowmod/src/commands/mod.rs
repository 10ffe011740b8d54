// shadowmod/src/commands/mod.rs

pub mod build;
pub mod clean;
pub mod resolve;
