//! Approval details tooltip: attaches an [`ApprovalSummary`] to a display
//! symbol as an attribute bag and serializes it to markup.

use serde::Serialize;

use crate::error::CoreError;
use crate::summary::ApprovalSummary;

/// CSS class the approval status widget binds to.
pub const DETAILS_CLASS: &str = "approvaldetails";

/// Preview icon placed inside the details span.
pub const PREVIEW_ICON_HTML: &str =
    r#"<i class="icon fa fa-search-plus fa-fw" title="Show details" aria-label="Show details"></i>"#;

/// A display symbol with its approval detail attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsTooltip {
    symbol: String,
    attributes: Vec<(&'static str, String)>,
}

impl DetailsTooltip {
    /// Attach `summary` to `symbol`. The symbol is kept verbatim.
    pub fn wrap(symbol: impl Into<String>, summary: &ApprovalSummary) -> Result<Self, CoreError> {
        let attributes = vec![
            ("class", DETAILS_CLASS.to_string()),
            ("data-pending", to_json(&summary.pending)?),
            ("data-approved", to_json(&summary.approved)?),
            ("data-rejected", to_json(&summary.rejected)?),
            ("data-filename", summary.filename.clone()),
            ("data-status", to_json(&summary.status)?),
        ];

        Ok(Self {
            symbol: symbol.into(),
            attributes,
        })
    }

    pub fn attributes(&self) -> &[(&'static str, String)] {
        &self.attributes
    }

    /// Look up one attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Render `symbol<span attrs…>icon</span>` with escaped attribute values.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.symbol.len() + 256);
        html.push_str(&self.symbol);
        html.push_str("<span");
        for (name, value) in &self.attributes {
            html.push(' ');
            html.push_str(name);
            html.push_str("=\"");
            html.push_str(&escape_html(value));
            html.push('"');
        }
        html.push('>');
        html.push_str(PREVIEW_ICON_HTML);
        html.push_str("</span>");
        html
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value).map_err(|e| CoreError::Internal(format!("Tooltip serialization failed: {e}")))
}

/// Escape text for use in HTML element content or a double-quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
