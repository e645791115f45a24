//! Resolve command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use keygate_core::{PassOptions, Resolution, SigningDecision, SigningPass};

use crate::cli::output;
use crate::cli::{load_project_config, Cli, OutputFormat, SourceArgs};

/// Locate the release keystore without applying any policy
#[derive(Debug, Args)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing resolve command");
        let loaded = load_project_config()?;
        debug!(config = ?loaded.path, root = %loaded.root.display(), "project configuration");
        let options = self.source.apply(PassOptions::default());
        let resolution = SigningPass::new(&loaded.config, &loaded.root, options).resolve()?;

        match cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resolution_json(&resolution))?
                );
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_resolution(&resolution);
                }
            }
        }

        Ok(())
    }
}

fn print_resolution(resolution: &Resolution) {
    println!("{}", output::header("Release Keystore"));
    println!();
    println!(
        "{}",
        output::key_value(
            "Properties",
            &output::path_style()
                .apply_to(resolution.properties_file.display())
                .to_string()
        )
    );
    if !resolution.properties_present {
        output::info("No properties file, release signing is not configured");
    }

    match &resolution.decision {
        SigningDecision::Available {
            credentials,
            keystore,
        } => {
            output::success(&format!(
                "Keystore found at {}",
                output::path_style().apply_to(keystore.display())
            ));
            println!("{}", output::key_value("Key alias", &credentials.key_alias));
            for field in credentials.blank_fields() {
                output::warning(&format!(
                    "'{}' is blank; signing will fail if the build needs it",
                    field
                ));
            }
        }
        SigningDecision::Unavailable { reason } => {
            println!(
                "{} {}",
                style("Release signing unavailable:").yellow().bold(),
                reason
            );
            for path in reason.searched() {
                println!("  {} {}", style("✗").red(), path.display());
            }
        }
    }
}

fn resolution_json(resolution: &Resolution) -> serde_json::Value {
    let decision = &resolution.decision;
    let searched = decision.reason().map(|r| r.searched()).unwrap_or_default();
    serde_json::json!({
        "properties_file": resolution.properties_file.to_string_lossy(),
        "properties_present": resolution.properties_present,
        "candidate_dirs": path_strings(&resolution.candidate_dirs),
        "available": decision.is_available(),
        "keystore": decision.keystore().map(|p| p.to_string_lossy().to_string()),
        "key_alias": decision.credentials().map(|c| c.key_alias.clone()),
        "blank_fields": decision
            .credentials()
            .map(|c| c.blank_fields())
            .unwrap_or_default(),
        "reason": decision.reason().map(|r| r.to_string()),
        "reason_code": decision.reason().map(|r| r.code()),
        "searched": path_strings(searched),
    })
}

fn path_strings(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect()
}
