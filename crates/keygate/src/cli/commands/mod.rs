//! CLI commands

mod completions;
mod init;
mod plan;
mod resolve;
mod validate;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use plan::PlanCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
