// src/domain/ports/mod.rs

pub mod graph;

pub use graph::GraphProvider;
