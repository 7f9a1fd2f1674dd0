//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use projgen_common_config::{env::vars, ConfigLoader, ProjgenConfig};
use tracing::debug;

use crate::commands::{ConfigCommand, ShowCommand, SynthCommand};
use crate::error::CliError;

/// projgen - declarative project file generator
///
/// Builds a tree of file constructs and writes them all in one pass.
#[derive(Debug, Parser)]
#[command(
    name = "projgen",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Project directory holding `.projgen/config.yaml`
    #[arg(
        short = 'C',
        long,
        global = true,
        env = vars::PROJGEN_PROJECT_DIR,
        default_value = ".",
        value_hint = ValueHint::DirPath
    )]
    pub project_dir: PathBuf,

    /// Explicit configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::PROJGEN_CONFIG,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate every file of the project
    Synth(SynthCommand),

    /// Print generated contents without writing them
    Show(ShowCommand),

    /// Inspect or create the configuration
    Config(ConfigCommand),
}

impl Cli {
    /// Load configuration from the explicit file or the project directory
    pub fn load_config(&self) -> Result<ProjgenConfig, CliError> {
        let loader = ConfigLoader::new(&self.project_dir);

        let config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(self, config: ProjgenConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            project_dir: self.project_dir,
            config_file: self.config,
            format: self.format,
            quiet: self.quiet,
        };

        match self.command {
            Command::Synth(cmd) => cmd.execute(&ctx),
            Command::Show(cmd) => cmd.execute(&ctx),
            Command::Config(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: ProjgenConfig,
    pub project_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    /// Output directory from the configuration, under the project directory
    pub fn output_dir(&self) -> PathBuf {
        resolve(&self.project_dir, &self.config.output.directory)
    }

    /// Config file in use, or the one that would be used
    pub fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| ConfigLoader::new(&self.project_dir).config_path())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_synth_with_dir() {
        let cli = Cli::try_parse_from(["projgen", "-vv", "synth", "--dir", "out"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Synth(cmd) => assert_eq!(cmd.dir, Some(PathBuf::from("out"))),
            other => panic!("Expected synth, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["projgen", "-q", "-v", "synth"]).is_err());
    }

    #[test]
    fn test_output_dir_relative_to_project() {
        let ctx = CommandContext {
            config: ProjgenConfig::default(),
            project_dir: PathBuf::from("/work/proj"),
            config_file: None,
            format: OutputFormat::Text,
            quiet: false,
        };
        assert_eq!(ctx.output_dir(), PathBuf::from("/work/proj/generated"));
        assert_eq!(
            ctx.config_path(),
            PathBuf::from("/work/proj/.projgen/config.yaml")
        );
    }
}
