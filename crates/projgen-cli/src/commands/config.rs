//! Config command implementation.

use clap::{Parser, Subcommand};
use projgen_common_config::{ConfigLoader, ProjgenConfig};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, SimpleOutput};

/// Inspect or create the configuration
#[derive(Debug, Parser)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default `.projgen/config.yaml`
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        match &self.action {
            ConfigAction::Show => print_output(ctx, &EffectiveConfig(&ctx.config)),
            ConfigAction::Path => print_output(
                ctx,
                &SimpleOutput::new(ctx.config_path().display().to_string()),
            ),
            ConfigAction::Init { force } => {
                let loader = ConfigLoader::new(&ctx.project_dir);
                let path = loader.config_path();

                if path.exists() && !force {
                    return Err(CliError::User {
                        message: format!("Config file already exists: {}", path.display()),
                        hint: Some("Use --force to overwrite it".to_string()),
                    });
                }

                loader.save(&ProjgenConfig::default())?;
                print_output(
                    ctx,
                    &SimpleOutput::new(format!("✓ Created {}", path.display())),
                )
            }
        }
    }
}

#[derive(serde::Serialize)]
#[serde(transparent)]
struct EffectiveConfig<'a>(&'a ProjgenConfig);

impl FormattedOutput for EffectiveConfig<'_> {
    fn format_text(&self) -> String {
        serde_yaml::to_string(self.0)
            .unwrap_or_else(|e| format!("# failed to serialize config: {e}"))
            .trim_end()
            .to_string()
    }
}
