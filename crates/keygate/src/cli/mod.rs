//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use keygate_core::config::{load_config_or_default, project_root, Config};
use keygate_core::PassOptions;

use commands::{CompletionsCommand, InitCommand, PlanCommand, ResolveCommand, ValidateCommand};

/// Keygate - Release signing resolver for build pipelines
#[derive(Debug, Parser)]
#[command(name = "keygate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decide release signing for each build type
    Plan(PlanCommand),

    /// Locate the release keystore without applying any policy
    Resolve(ResolveCommand),

    /// Validate the configuration file
    Validate(ValidateCommand),

    /// Create a Keygate configuration
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where to read signing inputs from, shared by `plan` and `resolve`
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Properties file to read instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub properties: Option<PathBuf>,

    /// Directory to search for a relative storeFile; repeat in priority
    /// order to replace the configured list
    #[arg(long = "candidate-dir", value_name = "DIR")]
    pub candidate_dirs: Vec<PathBuf>,
}

impl SourceArgs {
    /// Apply the overrides to pass options
    pub fn apply(&self, mut options: PassOptions) -> PassOptions {
        if let Some(path) = &self.properties {
            options = options.with_properties_file(path.clone());
        }
        if !self.candidate_dirs.is_empty() {
            options = options.with_candidate_dirs(self.candidate_dirs.clone());
        }
        options
    }
}

/// Configuration plus the directory its relative paths start from
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
    pub root: PathBuf,
}

/// Find and load the configuration for the current directory
pub fn load_project_config() -> anyhow::Result<LoadedConfig> {
    let cwd = std::env::current_dir()?;
    let (config, path) = load_config_or_default(&cwd)?;
    let root = project_root(path.as_deref(), &cwd);
    Ok(LoadedConfig { config, path, root })
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Plan(ref cmd) => cmd.execute(&self),
            Commands::Resolve(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_with_overrides() {
        let cli = Cli::try_parse_from([
            "keygate",
            "plan",
            "--policy",
            "permissive",
            "--candidate-dir",
            "app",
            "--candidate-dir",
            ".",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Plan(plan) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(
            plan.source.candidate_dirs,
            vec![PathBuf::from("app"), PathBuf::from(".")]
        );
    }

    #[test]
    fn test_source_args_apply() {
        let args = SourceArgs {
            properties: Some(PathBuf::from("android/key.properties")),
            candidate_dirs: vec![],
        };
        let options = args.apply(PassOptions::default());
        assert_eq!(
            options.properties_file,
            Some(PathBuf::from("android/key.properties"))
        );
        assert!(options.candidate_dirs.is_none());
    }
}
