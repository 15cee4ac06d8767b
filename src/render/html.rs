//! HTML renderer for module content.

use crate::ast::Fragment;
use crate::parser::parse_fragments;
use crate::render::escape_html;
use crate::render::inline::InlineFormatter;
use crate::render::math::{MathBackend, MathOptions, MathTypesetter};
use crate::toc::{render_toc, table_of_contents};

/// Configuration for HTML rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlConfig {
    /// Math rendering backend.
    pub math_backend: MathBackend,
    /// Options passed to the math backend.
    pub math: MathOptions,
    /// Whether to generate a complete HTML document or just the body content.
    pub standalone: bool,
    /// Document title (for standalone mode).
    pub title: Option<String>,
    /// Additional CSS to include.
    pub custom_css: Option<String>,
    /// Whether module views include a table of contents.
    pub include_toc: bool,
    /// CSS class prefix for styling.
    pub class_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            math_backend: MathBackend::KaTeX,
            math: MathOptions::default(),
            standalone: false,
            title: None,
            custom_css: None,
            include_toc: true,
            class_prefix: "lm-".to_string(),
        }
    }
}

/// Render module content to HTML.
///
/// Returns the concatenated fragment markup, or a full page in standalone
/// mode.
pub fn render_html(content: &str, config: &HtmlConfig) -> String {
    let renderer = HtmlRenderer::new(config);
    if config.standalone {
        let toc = if config.include_toc {
            render_toc(&table_of_contents(content), &config.class_prefix)
        } else {
            String::new()
        };
        let body = format!("{}{}", toc, renderer.render_body(content));
        renderer.render_page(config.title.as_deref().unwrap_or("Module"), &body)
    } else {
        renderer.render_body(content)
    }
}

/// Turns fragments into markup with a fixed math backend.
pub struct HtmlRenderer<'a> {
    config: &'a HtmlConfig,
    math: MathTypesetter,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a HtmlConfig) -> Self {
        Self {
            config,
            math: MathTypesetter::new(config.math_backend, &config.math, &config.class_prefix),
        }
    }

    /// Segment and render `content`, concatenating fragment markup.
    pub fn render_body(&self, content: &str) -> String {
        let fragments = parse_fragments(content);
        log::debug!("rendering {} fragments", fragments.len());

        let mut output: String = self.render_fragments(&fragments).concat();

        // A fence left open still needs its container closed.
        let open_fences = fragments.iter().filter(|f| f.is_fence()).count();
        if open_fences % 2 == 1 {
            output.push_str("</code></pre>\n");
        }

        output
    }

    /// Render each fragment to its markup, in order.
    pub fn render_fragments(&self, fragments: &[Fragment]) -> Vec<String> {
        fragments.iter().map(|f| self.render_fragment(f)).collect()
    }

    pub fn render_fragment(&self, fragment: &Fragment) -> String {
        let p = &self.config.class_prefix;
        match fragment {
            Fragment::Heading { level, text, anchor } => format!(
                r#"<h{level} id="{anchor}" class="{p}heading">{}</h{level}>"#,
                escape_html(text)
            ) + "\n",
            Fragment::BulletItem(text) => format!(
                r#"<div class="{p}bullet"><span class="{p}bullet-marker">&bull;</span> {}</div>"#,
                self.inline(text)
            ) + "\n",
            Fragment::NumberedItem { number, text } => format!(
                r#"<div class="{p}numbered"><span class="{p}number">{number}.</span> {}</div>"#,
                self.inline(text)
            ) + "\n",
            Fragment::CodeFenceOpen => format!(r#"<pre class="{p}code"><code>"#),
            Fragment::CodeLine(line) => format!("{}\n", escape_html(line)),
            Fragment::CodeFenceClose => "</code></pre>\n".to_string(),
            Fragment::DisplayMathLine(expression) => format!(
                r#"<div class="{p}math-display">{}</div>"#,
                self.math.render(expression, true)
            ) + "\n",
            Fragment::BlankLine => "<br>\n".to_string(),
            Fragment::Paragraph(text) => {
                format!(r#"<p class="{p}paragraph">{}</p>"#, self.inline(text)) + "\n"
            }
        }
    }

    /// Wrap rendered body markup in a complete HTML document.
    pub fn render_page(&self, title: &str, body: &str) -> String {
        let mut output = String::new();
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("<meta charset=\"UTF-8\">\n");
        output.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        output.push_str(&self.head_content());
        output.push_str("</head>\n<body>\n");
        output.push_str(&format!(
            "<main class=\"{}app\">\n",
            self.config.class_prefix
        ));
        output.push_str(body);
        output.push_str("</main>\n</body>\n</html>");
        output
    }

    /// Math assets, default styles and custom CSS for the page head.
    ///
    /// Hosts that embed body markup in their own page need this too.
    pub fn head_content(&self) -> String {
        let mut output = String::new();
        if let Some(head) = self.math.head_content() {
            output.push_str(&head);
            output.push('\n');
        }

        output.push_str(&self.default_styles());

        if let Some(ref css) = self.config.custom_css {
            output.push_str("<style>\n");
            output.push_str(css);
            output.push_str("\n</style>\n");
        }
        output
    }

    fn inline(&self, text: &str) -> String {
        InlineFormatter::new(&self.math, &self.config.class_prefix).format(text)
    }

    fn default_styles(&self) -> String {
        format!(
            r#"<style>
.{p}app {{ max-width: 960px; margin: 0 auto; padding: 2em; font-family: system-ui, sans-serif; line-height: 1.6; }}
.{p}heading {{ scroll-margin-top: 1em; }}
.{p}paragraph {{ margin: 0.5em 0; }}
.{p}bullet, .{p}numbered {{ margin: 0.25em 0 0.25em 1.5em; }}
.{p}bullet-marker, .{p}number {{ color: #666; margin-right: 0.25em; }}
.{p}code {{ background: #f6f8fa; padding: 1em; border-radius: 6px; overflow-x: auto; }}
.{p}code-inline {{ background: #f0f0f0; padding: 0.1em 0.3em; border-radius: 3px; font-family: monospace; }}
.{p}math-display {{ text-align: center; margin: 1em 0; overflow-x: auto; }}
.{p}math-inline {{ white-space: nowrap; }}
.{p}toc {{ background: #fafafa; padding: 1em 2em; margin: 1em 0 2em; border-radius: 4px; }}
.{p}toc ul {{ list-style: none; padding-left: 1.5em; }}
.{p}toc > ul {{ padding-left: 0; }}
.{p}progress-bar {{ background: #eee; height: 8px; border-radius: 4px; }}
.{p}progress-fill {{ background: #2e7d32; height: 100%; border-radius: 4px; }}
.{p}grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1em; }}
.{p}card {{ border: 1px solid #ddd; border-radius: 8px; padding: 1em; cursor: pointer; }}
.{p}card-complete {{ border-color: #2e7d32; }}
.{p}card-icon {{ font-size: 2em; }}
.{p}card-topics {{ display: flex; flex-wrap: wrap; gap: 0.25em; list-style: none; padding: 0; }}
.{p}card-topics li {{ background: #eef; border-radius: 3px; padding: 0 0.4em; font-size: 0.85em; }}
.{p}badge {{ color: #2e7d32; font-weight: bold; }}
</style>
"#,
            p = self.config.class_prefix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(content: &str) -> String {
        render_html(content, &HtmlConfig::default())
    }

    #[test]
    fn test_plain_paragraph_roundtrip() {
        assert_eq!(
            body("Transformers process tokens in parallel."),
            "<p class=\"lm-paragraph\">Transformers process tokens in parallel.</p>\n"
        );
    }

    #[test]
    fn test_heading_with_anchor() {
        assert_eq!(
            body("# Title"),
            "<h1 id=\"heading-0\" class=\"lm-heading\">Title</h1>\n"
        );
    }

    #[test]
    fn test_heading_text_is_not_inline_formatted() {
        let html = body("## **Raw** $x$");
        assert!(html.contains(">**Raw** $x$</h2>"));
    }

    #[test]
    fn test_bullet_item() {
        let html = body("- item one");
        assert!(html.starts_with("<div class=\"lm-bullet\">"));
        assert!(html.contains("</span> item one</div>"));
    }

    #[test]
    fn test_numbered_item_keeps_number() {
        let html = body("2. second *step*");
        assert!(html.contains("<span class=\"lm-number\">2.</span> second <em>step</em>"));
    }

    #[test]
    fn test_code_block_is_verbatim() {
        let html = body("```\nlet x = a * b; // **not bold**\n```");
        assert_eq!(
            html,
            "<pre class=\"lm-code\"><code>let x = a * b; // **not bold**\n</code></pre>\n"
        );
    }

    #[test]
    fn test_unclosed_fence_is_closed_in_markup() {
        let html = body("```\nfn main() {}");
        assert!(html.ends_with("fn main() {}\n</code></pre>\n"));
    }

    #[test]
    fn test_standalone_math_line() {
        let html = body("$x^2$");
        assert_eq!(
            html,
            "<div class=\"lm-math-display\">\\[x^2\\]</div>\n"
        );
    }

    #[test]
    fn test_double_dollar_line_renders_through_inline_stage() {
        assert_eq!(
            body("$$x$$"),
            "<p class=\"lm-paragraph\"><div class=\"lm-math-display\">\\[x\\]</div></p>\n"
        );
    }

    #[test]
    fn test_long_number_is_kept() {
        let html = body("99999999999999999999. item");
        assert!(html.contains("<span class=\"lm-number\">99999999999999999999.</span> item"));
    }

    #[test]
    fn test_head_content_without_standalone() {
        let config = HtmlConfig {
            custom_css: Some(".extra { color: red; }".to_string()),
            ..Default::default()
        };
        let head = HtmlRenderer::new(&config).head_content();
        assert!(head.contains("katex.min.css"));
        assert!(head.contains(".lm-math-display { text-align: center;"));
        assert!(head.contains(".extra { color: red; }"));
    }

    #[test]
    fn test_blank_line_is_break() {
        assert_eq!(body("a\n\nb"), "<p class=\"lm-paragraph\">a</p>\n<br>\n<p class=\"lm-paragraph\">b</p>\n");
    }

    #[test]
    fn test_malformed_math_is_flagged() {
        let html = body("Broken $\\frac{1}{$ here");
        assert!(html.contains("lm-math-error"));
        assert!(html.contains("\\frac{1}{"));
        assert!(html.contains(" here</p>"));
    }

    #[test]
    fn test_fragment_markup_count() {
        let config = HtmlConfig::default();
        let renderer = HtmlRenderer::new(&config);
        let fragments = parse_fragments("# a\n- b\n```\nc\n```\n");
        assert_eq!(renderer.render_fragments(&fragments).len(), 6);
    }

    #[test]
    fn test_render_standalone() {
        let config = HtmlConfig {
            standalone: true,
            title: Some("Attention".to_string()),
            ..Default::default()
        };
        let html = render_html("# Intro\ntext", &config);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Attention</title>"));
        assert!(html.contains("katex.min.js"));
        assert!(html.contains("href=\"#heading-0\""));
        assert!(html.contains("id=\"heading-0\""));
    }
}
