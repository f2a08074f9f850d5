//! HTML rendering of the panel view

use crate::models::Feedback;
use crate::view::{PanelContent, PanelView, TicketRow};

/// Render the panel's container contents
pub fn render_html(view: &PanelView) -> String {
    let mut html = match &view.content {
        PanelContent::Notice { message } | PanelContent::Error { message } => {
            format!("<p>{}</p>", html_escape(message))
        }
        PanelContent::Table { rows } => render_table(view, rows),
    };

    if let Some(link) = &view.view_all {
        html.push_str(&format!(
            "<p><a href=\"{}\" target=\"_blank\">{}</a></p>",
            html_escape(&link.url),
            html_escape(&link.label)
        ));
    }

    html
}

fn render_table(view: &PanelView, rows: &[TicketRow]) -> String {
    let base_url = view.base_url.as_ref().map(|u| u.as_str()).unwrap_or("");
    let mut html = format!(
        "<table data-baseurl=\"{}\">\n<thead>\n<tr><th>Key</th><th>Summary</th><th>Status</th><th>Time Tracking</th></tr>\n</thead>\n<tbody>\n",
        html_escape(base_url)
    );

    for row in rows {
        let key = html_escape(&row.key);
        let icon = row
            .icon_url
            .as_deref()
            .map(|src| {
                format!(
                    "<img src=\"{}\" alt=\"icon\" class=\"ticket-icon\">",
                    html_escape(src)
                )
            })
            .unwrap_or_default();

        html.push_str("<tr>\n");
        html.push_str(&format!(
            "<td><a href=\"{}\" target=\"_blank\">{}{}</a></td>\n",
            html_escape(&row.browse_url),
            icon,
            key
        ));
        html.push_str(&format!("<td>{}</td>\n", html_escape(&row.summary)));
        html.push_str(&format!(
            "<td><span class=\"status {}\">{}</span></td>\n",
            row.status_class.as_class(),
            html_escape(&row.status_name)
        ));
        html.push_str(&format!(
            "<td>\n<div class=\"time-tracking\">\
             <input type=\"text\" class=\"time-input\" data-key=\"{key}\" placeholder=\"1h, 1d 2h\" />\
             <button class=\"time-submit\" data-key=\"{key}\">Add</button>\
             </div>\n<div id=\"{slot}\" class=\"feedback\"></div>\n</td>\n",
            key = key,
            slot = html_escape(&row.feedback_slot)
        ));
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Render a row's feedback element after a submission
pub fn render_feedback(slot: &str, feedback: &Feedback) -> String {
    format!(
        "<div id=\"{}\" class=\"feedback {}\">{}</div>",
        html_escape(slot),
        feedback.kind.as_class(),
        html_escape(&feedback.message)
    )
}

/// Simple HTML escape for text and attribute values
fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
