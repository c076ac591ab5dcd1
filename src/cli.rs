//! CLI domain: parse, route, help, output, and presentation only.
//! No navigation logic; a single route table dispatches to the state engine.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_stack, format_stack_json, format_stack_text};
pub use route::RunContext;
