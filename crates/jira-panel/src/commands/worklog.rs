use anyhow::Result;
use panel_core::{init_from_reply, submit_worklog, InitOutcome};
use std::process::ExitCode;

use crate::cli::OutputFormat;
use crate::commands::workspace::{client_for, request_base_url};
use crate::config::Config;
use crate::output::{output_feedback, output_view};

/// Log time against one ticket without loading the ticket list
pub fn handle_log(
    config: &Config,
    key: &str,
    time: &[String],
    format: OutputFormat,
) -> Result<ExitCode> {
    let reply = request_base_url(config)?;
    let client = client_for(config, reply.as_ref())?;

    let base_url = match init_from_reply(reply) {
        InitOutcome::Ready(base_url) => base_url,
        InitOutcome::Halted(view) => {
            output_view(&view, format);
            return Ok(ExitCode::FAILURE);
        }
    };

    let feedback = submit_worklog(&client, &base_url, key, &time.join(" "));
    output_feedback(key, &feedback, format);

    Ok(if feedback.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
