//! Shell completions generation command

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::output;
use crate::cli::Cli;

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output to file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, "executing completions command");

        match &self.output {
            Some(path) => {
                let mut file = std::fs::File::create(path)?;
                write_completions(self.shell, &mut file);
                if !cli.quiet {
                    output::success(&format!(
                        "Completions written to {}",
                        output::path_style().apply_to(path.display())
                    ));
                }
            }
            None => write_completions(self.shell, &mut io::stdout()),
        }

        Ok(())
    }
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_name_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("keygate"));
        assert!(script.contains("plan"));
        assert!(script.contains("resolve"));
    }

    #[test]
    fn test_parse_shell_argument() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["keygate", "completions", "zsh"]).unwrap();
        let crate::cli::Commands::Completions(cmd) = cli.command else {
            panic!("expected completions command");
        };
        assert_eq!(cmd.shell, Shell::Zsh);
    }
}
