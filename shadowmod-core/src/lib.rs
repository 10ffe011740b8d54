// shadowmod-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts towards the outside world (external toolchain).
pub mod ports;

// 2. Domain (business core)
// Package graph, override map, manifest text and shadow naming.
// Depends on NOTHING else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Filesystem probes, shadow writer, config files, process toolchain, discovery.
// Depends on Domain and Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (Resolve, Build, Clean).
// Depends on Domain, Infra and Ports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use shadowmod_core::ShadowmodError;
pub use error::ShadowmodError;
