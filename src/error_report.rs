use std::{fmt::Display, path::Path};

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::GENERIC_REPORT_MESSAGE;

pub const ERROR_REPORT_TITLE: &str = "WebForm failed to start";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub title: String,
    pub root_path: String,
    pub message: String,
    pub stack_or_serialized: String,
}

impl ErrorReport {
    /// Fails only when the error cannot be serialized.
    pub fn try_from_error<E>(title: &str, root_path: &Path, error: &E) -> serde_json::Result<Self>
    where
        E: Display + Serialize + ?Sized,
    {
        Ok(Self {
            title: title.to_string(),
            root_path: root_path.display().to_string(),
            message: error.to_string(),
            stack_or_serialized: serde_json::to_string_pretty(error)?,
        })
    }

    pub fn generic(root_path: &Path) -> Self {
        Self {
            title: ERROR_REPORT_TITLE.to_string(),
            root_path: root_path.display().to_string(),
            message: GENERIC_REPORT_MESSAGE.to_string(),
            stack_or_serialized: String::new(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>");
        html.push_str(&escape_html(&self.title));
        html.push_str("</title></head><body style=\"font-family: sans-serif; padding: 24px;\">");
        html.push_str(&format!("<h1>{}</h1>", escape_html(&self.title)));
        html.push_str(&format!(
            "<p><strong>Application root:</strong> <code>{}</code></p>",
            escape_html(&self.root_path)
        ));
        html.push_str(&format!("<h2>Error</h2><p>{}</p>", escape_html(&self.message)));
        if !self.stack_or_serialized.is_empty() {
            html.push_str(&format!(
                "<h2>Details</h2><pre>{}</pre>",
                escape_html(&self.stack_or_serialized)
            ));
        }
        html.push_str("</body></html>");
        html
    }
}

/// Renders the diagnostic page for `error`. Falls back to the generic report
/// when the error cannot be serialized.
pub fn render_error_report<E>(root_path: &Path, error: &E) -> String
where
    E: Display + Serialize + ?Sized,
{
    match ErrorReport::try_from_error(ERROR_REPORT_TITLE, root_path, error) {
        Ok(report) => report.to_html(),
        Err(serialize_error) => {
            crate::append_debug_log(&format!(
                "error report serialization failed, using generic report: {serialize_error}"
            ));
            ErrorReport::generic(root_path).to_html()
        }
    }
}

/// Renders a diagnostic page for a plain message with no structured form.
pub fn render_message_report(root_path: &Path, message: &str) -> String {
    ErrorReport {
        title: ERROR_REPORT_TITLE.to_string(),
        root_path: root_path.display().to_string(),
        message: message.to_string(),
        stack_or_serialized: String::new(),
    }
    .to_html()
}

pub fn html_data_url(html: &str) -> String {
    format!(
        "data:text/html;charset=utf-8,{}",
        utf8_percent_encode(html, NON_ALPHANUMERIC)
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
