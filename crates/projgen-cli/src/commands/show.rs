//! Show command implementation.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, ShowOutput, ShownFile};
use crate::sample;

/// Print generated file contents without writing anything
#[derive(Debug, Parser)]
pub struct ShowCommand {
    /// Only show this file, relative to the output directory
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ShowCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let directory = ctx.output_dir();
        let project = sample::build(&directory, &ctx.config)
            .map_err(|e| CliError::generation("Failed to build project", e))?;
        let rendered = projgen_construct::render(&project)
            .map_err(|e| CliError::generation("Failed to render project", e))?;

        let mut files: Vec<ShownFile> = rendered
            .into_iter()
            .map(|file| ShownFile {
                contents: file.contents.as_text().map(str::to_string),
                path: file.path,
                executable: file.executable,
            })
            .collect();

        if let Some(wanted) = &self.file {
            let target = directory.join(wanted);
            let available = relative_paths(&files, &directory);
            files.retain(|file| file.path == target);

            if files.is_empty() {
                return Err(CliError::not_found_with_suggestions(
                    "file",
                    wanted.display().to_string(),
                    available,
                ));
            }
        }

        print_output(ctx, &ShowOutput { directory, files })
    }
}

fn relative_paths(files: &[ShownFile], directory: &Path) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            file.path
                .strip_prefix(directory)
                .unwrap_or(&file.path)
                .display()
                .to_string()
        })
        .collect()
}
