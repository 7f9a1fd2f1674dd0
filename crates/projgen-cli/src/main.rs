//! projgen CLI
//!
//! Main entry point for the `projgen` binary.

use std::process::ExitCode;

use clap::Parser;
use projgen_cli::cli::Cli;
use projgen_cli::CliError;
use projgen_common_config::Environment;
use projgen_common_log::{LogConfig, LogLevel};
use tracing::error;

fn main() -> ExitCode {
    // Loaded before parsing so `.env` can supply PROJGEN_* arguments
    let env = Environment::init();
    let cli = Cli::parse();

    init_logging(&cli);

    match env.map_err(CliError::from).and_then(|_| run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{e}");
            eprintln!("{}", e.render());
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config)
}

/// `-v`/`-q` override the level from the environment.
fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config.level = LogLevel::from_verbosity(cli.verbose, cli.quiet);
    }

    if let Err(e) = projgen_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
