//! Rendering layer for converting module content and session views to HTML.

pub mod html;
pub mod inline;
pub mod math;
pub mod overview;

pub use html::{render_html, HtmlConfig, HtmlRenderer};
pub use inline::{InlineFormatter, InlineStage, PIPELINE};
pub use math::{MathBackend, MathOptions, MathRenderer, MathTypesetter};
pub use overview::{render_module_view, render_overview};

/// Escape text for HTML element content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for a double-quoted HTML attribute.
pub fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}

/// Reverse [`escape_html`].
pub(crate) fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
