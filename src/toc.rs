//! Table of contents derived from module headings.
//!
//! Entries come from the same segmentation as the rendered body, so every
//! link target exists and headings inside code fences are skipped.

use crate::ast::Fragment;
use crate::parser::parse_fragments;
use crate::render::{escape_attr, escape_html};

/// One heading in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

/// Collect the headings of `content` in order.
pub fn table_of_contents(content: &str) -> Vec<TocEntry> {
    parse_fragments(content)
        .into_iter()
        .filter_map(|fragment| match fragment {
            Fragment::Heading {
                level,
                text,
                anchor,
            } => Some(TocEntry {
                level,
                text,
                anchor,
            }),
            _ => None,
        })
        .collect()
}

/// Render entries as a nested navigation list. Empty input renders nothing.
pub fn render_toc(entries: &[TocEntry], class_prefix: &str) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut output = format!("<nav class=\"{}toc\">\n<ul>\n", class_prefix);
    let base = entries.iter().map(|e| e.level).min().unwrap_or(1);
    let mut current_level = base;

    for (i, entry) in entries.iter().enumerate() {
        if i == 0 {
            output.push_str("<li>");
        } else if entry.level <= current_level {
            output.push_str("</li>\n");
            while current_level > entry.level {
                output.push_str("</ul>\n</li>\n");
                current_level -= 1;
            }
            output.push_str("<li>");
        }
        // Nested lists open inside the current item
        while current_level < entry.level {
            output.push_str("\n<ul>\n<li>");
            current_level += 1;
        }

        output.push_str(&format!(
            "<a href=\"#{}\">{}</a>",
            escape_attr(&entry.anchor),
            escape_html(&entry.text)
        ));
    }

    output.push_str("</li>\n");
    while current_level > base {
        output.push_str("</ul>\n</li>\n");
        current_level -= 1;
    }

    output.push_str("</ul>\n</nav>\n");
    output
}
