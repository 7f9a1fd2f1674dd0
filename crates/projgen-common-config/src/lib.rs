//! Configuration types for projgen.
//!
//! This crate provides the configuration types used by projgen
//! for `.projgen/config.yaml` files.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
