//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use keygate_core::config::defaults::{
    default_config_yaml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_PROPERTIES_FILE,
    PROPERTIES_TEMPLATE,
};

use crate::cli::output;
use crate::cli::Cli;

/// Create a Keygate configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write a key.properties template next to the configuration
    #[arg(long)]
    pub properties_template: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_TOML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        // An explicit extension decides the format; otherwise ask
        let yaml = if has_yaml_extension(&config_path) {
            true
        } else if self.yes || self.output.is_some() {
            false
        } else {
            let formats = ["toml", "yaml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            formats[selection] == "yaml"
        };

        let (config_path, content) = if yaml && !has_yaml_extension(&config_path) {
            (config_path.with_extension("yaml"), default_config_yaml())
        } else if yaml {
            (config_path, default_config_yaml())
        } else {
            (config_path, DEFAULT_CONFIG_TEMPLATE.to_string())
        };

        std::fs::write(&config_path, content)?;
        info!(path = %config_path.display(), "wrote configuration");

        let properties_path = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(DEFAULT_PROPERTIES_FILE);
        let wrote_properties = if self.properties_template {
            write_properties_template(&properties_path)?
        } else {
            false
        };

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            if wrote_properties {
                output::success(&format!(
                    "Created properties template at {}",
                    output::path_style().apply_to(properties_path.display())
                ));
            } else if self.properties_template {
                output::info(&format!(
                    "Kept existing {}",
                    output::path_style().apply_to(properties_path.display())
                ));
            }
            println!();
            println!("Next steps:");
            println!(
                "  1. Fill in {} with your upload keystore",
                DEFAULT_PROPERTIES_FILE
            );
            println!(
                "  2. Run {} to verify your setup",
                style("keygate validate").cyan()
            );
            println!(
                "  3. Run {} to see how each build type is signed",
                style("keygate plan").cyan()
            );
        }

        Ok(())
    }
}

fn has_yaml_extension(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "yaml" || e == "yml")
}

/// Write the template unless a properties file is already there
fn write_properties_template(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        info!(path = %path.display(), "properties file exists, leaving it alone");
        return Ok(false);
    }
    std::fs::write(path, PROPERTIES_TEMPLATE)?;
    Ok(true)
}
