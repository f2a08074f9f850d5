use crate::cli::OutputFormat;
use colored::Colorize;
use panel_core::html::{render_feedback, render_html};
use panel_core::view::feedback_slot;
use panel_core::{
    Feedback, FeedbackKind, PanelContent, PanelView, ResolverResponse, StatusCategory, TicketRow,
};
use serde::Serialize;

pub fn output_view(view: &PanelView, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(view),
        OutputFormat::Html => println!("{}", render_html(view)),
        OutputFormat::Text => println!("{}", view.display()),
    }
}

#[derive(Serialize)]
struct FeedbackOutput<'a> {
    key: &'a str,
    #[serde(flatten)]
    feedback: &'a Feedback,
}

pub fn output_feedback(key: &str, feedback: &Feedback, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&FeedbackOutput { key, feedback }),
        OutputFormat::Html => println!("{}", render_feedback(&feedback_slot(key), feedback)),
        OutputFormat::Text => {
            println!("{}: {}", sanitize(key).cyan().bold(), feedback.display())
        }
    }
}

pub fn output_resolver_reply(reply: Option<&ResolverResponse>) {
    match reply {
        Some(reply) => print_json(reply),
        None => println!("null"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err).unwrap_or_else(|_| {
                format!(r#"{{"error": true, "message": "{}"}}"#, err)
            })
        }
        OutputFormat::Text | OutputFormat::Html => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for PanelView {
    fn display(&self) -> String {
        let mut output = match &self.content {
            PanelContent::Notice { message } => sanitize(message),
            PanelContent::Error { message } => sanitize(message).red().to_string(),
            PanelContent::Table { rows } => render_rows(rows),
        };

        if let Some(link) = &self.view_all {
            output.push_str(&format!("\n\n{}: {}", link.label, sanitize(&link.url).underline()));
        }

        output
    }
}

/// Replace control characters in server-supplied text so it can neither emit
/// terminal escape sequences nor start new lines
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

fn render_rows(rows: &[TicketRow]) -> String {
    let cells: Vec<_> = rows
        .iter()
        .map(|row| {
            (
                sanitize(&row.key),
                sanitize(&row.status_name),
                sanitize(&row.summary),
                sanitize(&row.browse_url),
                row.status_class,
            )
        })
        .collect();
    let key_width = cells.iter().map(|c| c.0.chars().count()).max().unwrap_or(0);
    let status_width = cells.iter().map(|c| c.1.chars().count()).max().unwrap_or(0);

    cells
        .iter()
        .map(|(key, status_name, summary, browse_url, class)| {
            // Pad before coloring so escape codes don't skew the columns
            let key = format!("{:<width$}", key, width = key_width);
            let status = format!("{:<width$}", status_name, width = status_width);
            format!(
                "{}  {}  {}\n{}  {}",
                key.cyan().bold(),
                colorize_status(&status, *class),
                summary,
                " ".repeat(key_width),
                browse_url.dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn colorize_status(text: &str, category: StatusCategory) -> String {
    match category {
        StatusCategory::Todo => text.blue().to_string(),
        StatusCategory::InProgress => text.yellow().to_string(),
        StatusCategory::Done => text.green().to_string(),
        StatusCategory::Other => text.dimmed().to_string(),
    }
}

impl Displayable for Feedback {
    fn display(&self) -> String {
        match self.kind {
            FeedbackKind::Success => sanitize(&self.message).green().to_string(),
            FeedbackKind::Error => sanitize(&self.message).red().to_string(),
        }
    }
}
