mod cli;
mod color;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands, OutputFormat};
use config::Config;
use output::output_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color, cli.format);
    setup_logging();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            output_error(&e, cli.format);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr so panel output on stdout stays clean
fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("JIRA_PANEL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli.cookies.clone(), cli.base_url.clone());

    match &cli.command {
        // Config commands work without a session
        Commands::Config { action } => handle_config(&config, cli, action),
        Commands::List => {
            config.validate()?;
            commands::tickets::handle_list(&config, cli.format)
        }
        Commands::Log { key, time } => {
            config.validate()?;
            commands::worklog::handle_log(&config, key, time, cli.format)
        }
        Commands::Session => {
            config.validate()?;
            let stdin = std::io::stdin();
            commands::tickets::handle_session(&config, cli.format, stdin.lock())
        }
        Commands::Resolve => {
            config.validate()?;
            commands::workspace::handle_resolve(&config)
        }
    }
}

fn handle_config(config: &Config, cli: &Cli, action: &ConfigCommands) -> Result<ExitCode> {
    match action {
        ConfigCommands::Show => {
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(config)?);
                }
                OutputFormat::Text | OutputFormat::Html => {
                    let cookies = config
                        .cookies
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(not set)".to_string());
                    println!("cookies: {}", cookies);
                    println!(
                        "base_url: {}",
                        config.base_url.as_deref().unwrap_or("(from cookies)")
                    );
                    println!("timeout_secs: {}", config.timeout_secs);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommands::Path => {
            for path in config::config_paths(cli.config.as_deref()) {
                let marker = if path.exists() { "" } else { " (missing)" };
                println!("{}{}", path.display(), marker);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
