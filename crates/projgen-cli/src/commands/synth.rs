//! Synth command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use projgen_common_config::env::vars;
use tracing::info;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, SynthOutput};
use crate::sample;

/// Generate every file of the sample project
#[derive(Debug, Parser)]
pub struct SynthCommand {
    /// Output directory, overriding `output.directory` from the config
    #[arg(long, env = vars::PROJGEN_OUTPUT_DIR, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,
}

impl SynthCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let directory = self.dir.clone().unwrap_or_else(|| ctx.output_dir());
        info!(directory = %directory.display(), "Synthesizing project");

        let project = sample::build(&directory, &ctx.config)
            .map_err(|e| CliError::generation("Failed to build project", e))?;
        let files = projgen_construct::synth(&project)?;

        print_output(ctx, &SynthOutput::new(directory, files))
    }
}
