//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Stable command name for log records (e.g. "switch", "env.init").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Switch { .. } => "switch",
        Commands::Env { init: true } => "env.init",
        Commands::Env { init: false } => "env",
        Commands::Clear => "clear",
        Commands::List { .. } => "list",
    }
}
