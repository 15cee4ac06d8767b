//! Block fragment definitions produced by the segmenter.

/// Prefix used for heading anchor ids.
pub const ANCHOR_PREFIX: &str = "heading-";

/// One classified line of module content.
///
/// Fragments are produced in input line order and live for a single render
/// pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A heading with level (1-4), raw text and anchor id
    Heading {
        level: u8,
        text: String,
        anchor: String,
    },

    /// A `- ` or `* ` list line
    BulletItem(String),

    /// A `1. ` list line; the number keeps its source digits
    NumberedItem { number: String, text: String },

    /// Opening ```` ``` ```` marker
    CodeFenceOpen,

    /// A verbatim line inside a fence
    CodeLine(String),

    /// Closing ```` ``` ```` marker
    CodeFenceClose,

    /// A whole line of `$...$` math, stored without delimiters
    DisplayMathLine(String),

    /// An empty (or whitespace-only) line
    BlankLine,

    /// Any other line
    Paragraph(String),
}

impl Fragment {
    /// Whether this fragment toggles a code fence.
    pub fn is_fence(&self) -> bool {
        matches!(self, Fragment::CodeFenceOpen | Fragment::CodeFenceClose)
    }
}

/// Anchor id for a heading found on the given 0-based line.
pub fn anchor_for_line(line_index: usize) -> String {
    format!("{}{}", ANCHOR_PREFIX, line_index)
}
