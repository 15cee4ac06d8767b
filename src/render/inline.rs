//! Inline formatting: an ordered pipeline of substitution stages.
//!
//! Each stage scans the output of the previous one. The order is part of
//! the contract: math is captured before emphasis so `*` inside an
//! expression never becomes markup, and bold runs before italic so paired
//! `**` are consumed first.
//!
//! Running the formatter over its own output is not supported.

use crate::parser::lexer::{display_math, emphasis, inline_code, inline_math, strong};
use crate::render::math::MathTypesetter;
use crate::render::{escape_html, unescape_html};
use nom::IResult;

/// One substitution stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStage {
    /// `$$...$$` in display mode, centered block
    DisplayMath,
    /// `$...$` in inline mode
    InlineMath,
    /// `**...**`
    Strong,
    /// `*...*`
    Emphasis,
    /// `` `...` ``
    Code,
}

/// Stage order.
pub const PIPELINE: [InlineStage; 5] = [
    InlineStage::DisplayMath,
    InlineStage::InlineMath,
    InlineStage::Strong,
    InlineStage::Emphasis,
    InlineStage::Code,
];

impl InlineStage {
    fn opener(self) -> &'static str {
        match self {
            InlineStage::DisplayMath => "$$",
            InlineStage::InlineMath => "$",
            InlineStage::Strong => "**",
            InlineStage::Emphasis => "*",
            InlineStage::Code => "`",
        }
    }

    fn recognizer(self) -> fn(&str) -> IResult<&str, &str> {
        match self {
            InlineStage::DisplayMath => display_math,
            InlineStage::InlineMath => inline_math,
            InlineStage::Strong => strong,
            InlineStage::Emphasis => emphasis,
            InlineStage::Code => inline_code,
        }
    }
}

/// Applies [`PIPELINE`] to block text.
pub struct InlineFormatter<'a> {
    math: &'a MathTypesetter,
    class_prefix: &'a str,
}

impl<'a> InlineFormatter<'a> {
    pub fn new(math: &'a MathTypesetter, class_prefix: &'a str) -> Self {
        Self { math, class_prefix }
    }

    /// Format `text`, escaping it for HTML first.
    pub fn format(&self, text: &str) -> String {
        PIPELINE
            .iter()
            .fold(escape_html(text), |acc, stage| self.apply(*stage, &acc))
    }

    /// Run a single stage over already escaped text.
    pub fn apply(&self, stage: InlineStage, text: &str) -> String {
        substitute(text, stage.opener(), stage.recognizer(), |content| {
            self.render_span(stage, content)
        })
    }

    fn render_span(&self, stage: InlineStage, content: &str) -> String {
        let p = self.class_prefix;
        match stage {
            InlineStage::DisplayMath => format!(
                r#"<div class="{}math-display">{}</div>"#,
                p,
                self.math.render(&unescape_html(content), true)
            ),
            InlineStage::InlineMath => format!(
                r#"<span class="{}math-inline">{}</span>"#,
                p,
                self.math.render(&unescape_html(content), false)
            ),
            InlineStage::Strong => format!("<strong>{}</strong>", content),
            InlineStage::Emphasis => format!("<em>{}</em>", content),
            InlineStage::Code => format!(r#"<code class="{}code-inline">{}</code>"#, p, content),
        }
    }
}

/// Replace every match of `recognizer`, scanning left to right.
///
/// When no span starts at an opener, scanning resumes one byte later, which
/// mirrors how a non-greedy pattern search retries.
fn substitute<F>(
    text: &str,
    opener: &str,
    recognizer: fn(&str) -> IResult<&str, &str>,
    mut render: F,
) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(opener) {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match recognizer(candidate) {
            Ok((after, content)) => {
                out.push_str(&render(content));
                rest = after;
            }
            Err(_) => {
                // Openers are ASCII
                out.push_str(&candidate[..1]);
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::render::math::{MathMode, MathRenderer};
    use pretty_assertions::assert_eq;

    /// Echoes its input so tests can see exactly what reached the backend.
    struct Echo;

    impl MathRenderer for Echo {
        fn render(&self, latex: &str, mode: MathMode) -> Result<String, RenderError> {
            match mode {
                MathMode::Inline => Ok(format!("i({})", latex)),
                MathMode::Display => Ok(format!("d({})", latex)),
            }
        }

        fn head_content(&self) -> Option<String> {
            None
        }
    }

    fn format(text: &str) -> String {
        let math = MathTypesetter::with_renderer(Box::new(Echo), "lm-");
        InlineFormatter::new(&math, "lm-").format(text)
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format("Just some words."), "Just some words.");
    }

    #[test]
    fn test_bold_then_italic() {
        assert_eq!(
            format("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_inline_math_reaches_renderer() {
        assert_eq!(
            format("$x^2$"),
            r#"<span class="lm-math-inline">i(x^2)</span>"#
        );
    }

    #[test]
    fn test_display_math_before_inline() {
        assert_eq!(
            format("see $$ a+b $$ and $c$"),
            r#"see <div class="lm-math-display">d(a+b)</div> and <span class="lm-math-inline">i(c)</span>"#
        );
    }

    #[test]
    fn test_star_inside_math_is_not_emphasis() {
        assert_eq!(
            format("$a*b*c$ *x*"),
            r#"<span class="lm-math-inline">i(a&#42;b&#42;c)</span> <em>x</em>"#
        );
    }

    #[test]
    fn test_math_sees_unescaped_text() {
        assert_eq!(
            format("$a < b$ & c"),
            r#"<span class="lm-math-inline">i(a < b)</span> &amp; c"#
        );
    }

    #[test]
    fn test_adjacent_bold_spans() {
        assert_eq!(
            format("**a** **b**"),
            "<strong>a</strong> <strong>b</strong>"
        );
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(
            format("**very *much* so**"),
            "<strong>very <em>much</em> so</strong>"
        );
    }

    #[test]
    fn test_code_runs_last() {
        assert_eq!(
            format("`*ptr`"),
            r#"<code class="lm-code-inline">*ptr</code>"#
        );
        assert_eq!(
            format("`a *b* c`"),
            r#"<code class="lm-code-inline">a <em>b</em> c</code>"#
        );
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(format("costs $5"), "costs $5");
        assert_eq!(format("2 * 3"), "2 * 3");
        assert_eq!(format("**open"), "**open");
    }

    #[test]
    fn test_inline_math_retries_after_double_dollar() {
        assert_eq!(
            format("$$x$"),
            r#"$<span class="lm-math-inline">i(x)</span>"#
        );
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(format("<script>"), "&lt;script&gt;");
    }
}
