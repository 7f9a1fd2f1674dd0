//! projgen CLI library
//!
//! Argument parsing, commands and output formatting for the `projgen` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod sample;

pub use error::CliError;
