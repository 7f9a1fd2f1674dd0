//! Command implementations.

mod config;
mod show;
mod synth;

pub use config::{ConfigAction, ConfigCommand};
pub use show::ShowCommand;
pub use synth::SynthCommand;
