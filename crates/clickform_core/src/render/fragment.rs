//! Response kinds and their rendered fragments.

use super::escape::push_escaped;
use crate::model::record::Record;
use std::fmt::Write;

pub const CLICKED_HTML: &str = r#"<div id="response">Button was clicked!</div>"#;
pub const FORM_SUBMITTED_HTML: &str = r#"<div id="response">Form submitted!</div>"#;
pub const GENERIC_HTML: &str = r#"<div id="response">You fooed it up!</div>"#;
pub const UPLOADED_HTML: &str = "<p>File uploaded!</p>";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Fixed acknowledgement fragments.
///
/// The record listing is rendered separately by [`render_listing`] because it
/// needs a store snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    ClickAcknowledged,
    FormSubmitted,
    /// Served by the `/test` endpoint.
    GenericAcknowledged,
    UploadAcknowledged,
}

impl ResponseKind {
    /// Literal fragment body for this kind.
    pub fn as_html(self) -> &'static str {
        match self {
            Self::ClickAcknowledged => CLICKED_HTML,
            Self::FormSubmitted => FORM_SUBMITTED_HTML,
            Self::GenericAcknowledged => GENERIC_HTML,
            Self::UploadAcknowledged => UPLOADED_HTML,
        }
    }
}

/// Rendered HTML bytes tagged with their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    body: String,
}

impl Fragment {
    pub fn content_type(&self) -> &'static str {
        HTML_CONTENT_TYPE
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn into_string(self) -> String {
        self.body
    }
}

/// Renders one of the fixed acknowledgement fragments.
pub fn render(kind: ResponseKind) -> Fragment {
    Fragment {
        body: kind.as_html().to_string(),
    }
}

/// Renders the record table, one row per record in the given order.
pub fn render_listing(records: &[Record]) -> Fragment {
    let mut body = String::from(
        r#"<table id="records"><thead><tr><th>ID</th><th>Name</th><th>Email</th></tr></thead><tbody>"#,
    );

    for record in records {
        // Writing into a String cannot fail.
        let _ = write!(body, "<tr><td>{}</td><td>", record.id);
        push_escaped(&mut body, &record.name);
        body.push_str("</td><td>");
        push_escaped(&mut body, &record.email);
        body.push_str("</td></tr>");
    }

    body.push_str("</tbody></table>");
    Fragment { body }
}
