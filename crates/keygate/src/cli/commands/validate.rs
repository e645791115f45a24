//! Validate command

use clap::Args;
use console::style;
use tracing::info;

use keygate_core::config::{find_config, load_config, project_root};
use keygate_core::{PassOptions, SigningDecision, SigningPass};

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes::ValidationFailed;

/// Validate the configuration file
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate the configuration file, skip the keystore lookup
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        let config_path = find_config(&cwd);
        let config = match &config_path {
            Some(path) => match load_config(path) {
                Ok(c) => Some(c),
                Err(e) => {
                    errors.push(format!("Configuration: {}", e));
                    None
                }
            },
            None => {
                errors.push(format!(
                    "Configuration: no keygate configuration found in {} or its parents",
                    cwd.display()
                ));
                None
            }
        };

        if let Some(cfg) = config.as_ref().filter(|_| !self.config_only) {
            let root = project_root(config_path.as_deref(), &cwd);
            let pass = SigningPass::new(cfg, &root, PassOptions::default());

            match pass.resolve() {
                Ok(resolution) => {
                    if !resolution.properties_present {
                        warnings.push(format!(
                            "Properties file {} not found",
                            resolution.properties_file.display()
                        ));
                    }
                    match &resolution.decision {
                        SigningDecision::Available { credentials, .. } => {
                            for field in credentials.blank_fields() {
                                warnings.push(format!("Property '{}' is blank", field));
                            }
                        }
                        SigningDecision::Unavailable { reason } => {
                            let strict_types: Vec<&str> = cfg
                                .build_types
                                .iter()
                                .filter(|(_, b)| !b.policy.allows_debug_fallback())
                                .map(|(name, _)| name.as_str())
                                .collect();
                            if strict_types.is_empty() {
                                warnings.push(format!(
                                    "Release signing unavailable ({}); build types will use the debug identity",
                                    reason
                                ));
                            } else {
                                errors.push(format!(
                                    "Release signing unavailable ({}); strict build types would fail: {}",
                                    reason,
                                    strict_types.join(", ")
                                ));
                            }
                        }
                    }
                }
                Err(e) => {
                    errors.push(format!("Properties: {}", e));
                }
            }
        }

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = &config_path {
                        println!("Config: {}", style(path.display()).cyan());
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    }
                }
            }
        }

        if !passed {
            return Err(ValidationFailed(errors.len()).into());
        }

        Ok(())
    }
}
