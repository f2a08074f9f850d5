use anyhow::{Context, Result};
use jira_backend::JiraClient;
use panel_core::{load_panel, PanelView, WorklogRegistry};
use std::io::BufRead;
use std::process::ExitCode;

use crate::cli::OutputFormat;
use crate::commands::workspace::{client_for, request_base_url};
use crate::config::Config;
use crate::output::{output_feedback, output_view};

fn open_panel(config: &Config) -> Result<(PanelView, JiraClient)> {
    let reply = request_base_url(config)?;
    let client = client_for(config, reply.as_ref())?;
    let view = load_panel(reply, &client);
    Ok((view, client))
}

pub fn handle_list(config: &Config, format: OutputFormat) -> Result<ExitCode> {
    let (view, _) = open_panel(config)?;
    output_view(&view, format);

    Ok(if view.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Render the panel, then log time for each "<KEY> <TIME...>" line on `input`
pub fn handle_session(
    config: &Config,
    format: OutputFormat,
    input: impl BufRead,
) -> Result<ExitCode> {
    let (view, client) = open_panel(config)?;
    output_view(&view, format);

    if view.is_error() {
        return Ok(ExitCode::FAILURE);
    }
    let Some(mut registry) = WorklogRegistry::from_view(&view) else {
        return Ok(ExitCode::SUCCESS);
    };

    for line in input.lines() {
        let line = line.context("Failed to read worklog input")?;
        let Some((key, time)) = parse_entry(&line) else {
            continue;
        };
        let feedback = registry.dispatch(&client, key, time);
        output_feedback(key, &feedback, format);
    }

    Ok(ExitCode::SUCCESS)
}

/// Split "ACME-1 1d 2h" into key and time; blank lines yield None
fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((key, time)) => Some((key, time.trim())),
        None => Some((line, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entry_splits_key_from_time() {
        assert_eq!(parse_entry("ACME-1 1d 2h"), Some(("ACME-1", "1d 2h")));
        assert_eq!(parse_entry("  ACME-2\t30m  "), Some(("ACME-2", "30m")));
        assert_eq!(parse_entry("ACME-3"), Some(("ACME-3", "")));
        assert_eq!(parse_entry("   "), None);
    }
}
