use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jira-panel",
    version,
    about = "Unresolved Jira tickets assigned to you, with worklog entry"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "JIRA_PANEL_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Netscape cookies.txt export holding the Jira session
    #[arg(long, global = true, value_name = "PATH")]
    pub cookies: Option<PathBuf>,

    /// Workspace URL; skips cookie-based workspace discovery
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show unresolved tickets assigned to you
    #[command(visible_alias = "ls")]
    List,
    /// Log time against a ticket
    Log {
        /// Ticket key (e.g., ACME-12)
        key: String,
        /// Time spent in Jira notation (e.g., 1h, "1d 2h")
        #[arg(num_args = 0.., trailing_var_arg = true)]
        time: Vec<String>,
    },
    /// Show tickets, then read "<KEY> <TIME>" lines from stdin and log each
    Session,
    /// Print the workspace resolver's reply
    Resolve,
    /// Configuration
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file locations that are searched
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_joins_time_words() {
        let cli = Cli::parse_from(["jira-panel", "log", "ACME-1", "1d", "2h"]);
        match cli.command {
            Commands::Log { key, time } => {
                assert_eq!(key, "ACME-1");
                assert_eq!(time.join(" "), "1d 2h");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "jira-panel",
            "list",
            "--base-url",
            "https://acme.atlassian.net",
            "-o",
            "html",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(cli.format, OutputFormat::Html);
    }
}
