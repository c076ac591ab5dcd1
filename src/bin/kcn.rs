//! kcn CLI Binary
//!
//! Command-line interface for kcn. Stdout carries shell code only.

use clap::Parser;
use kcn::cli::{command_name, map_error, Cli, RunContext};
use kcn::config::ConfigLoader;
use kcn::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let config = match ConfigLoader::load_with_override(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e.into()));
            process::exit(1);
        }
    };

    let command = match cli.resolve_command() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };
    debug!(command = command_name(&command), "kcn starting");

    let context = match RunContext::new(config, cli.state_path()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&command) {
        Ok(output) => {
            debug!(command = command_name(&command), "Command completed");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!(command = command_name(&command), "Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load_with_override(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.quiet {
        config.level = "off".to_string();
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    if config.output == "file" {
        let resolved =
            kcn::logging::resolve_log_file_path(cli.log_file.clone(), config.file.clone());
        if let Ok(path) = resolved {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
