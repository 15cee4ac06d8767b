//! KaTeX/MathJax passthrough renderer.

use super::{MathMode, MathOptions, MathRenderer};
use crate::error::RenderError;
use crate::render::escape_html;
use serde::Serialize;
use std::collections::BTreeMap;

/// Renderer that outputs escaped TeX for client-side rendering.
///
/// The TeX is checked for structural mistakes first so broken expressions
/// are flagged at render time rather than left to the browser.
pub struct KaTeXRenderer {
    use_mathjax: bool,
    options: MathOptions,
}

impl KaTeXRenderer {
    /// Create a new KaTeX renderer.
    pub fn new(options: MathOptions) -> Self {
        Self {
            use_mathjax: false,
            options,
        }
    }

    /// Create a renderer configured for MathJax.
    pub fn new_mathjax(options: MathOptions) -> Self {
        Self {
            use_mathjax: true,
            options,
        }
    }

    fn client_options_json(&self) -> String {
        let options = ClientOptions {
            delimiters: vec![
                Delimiter { left: "\\[", right: "\\]", display: true },
                Delimiter { left: "\\(", right: "\\)", display: false },
            ],
            throw_on_error: self.options.throw_on_error,
            strict: self.options.strict,
            trust: self.options.trust,
            macros: self.options.effective_macros().collect(),
        };
        serde_json::to_string(&options).unwrap_or_else(|_| "{}".to_string())
    }

    fn mathjax_macros_json(&self) -> String {
        let macros: BTreeMap<&str, &String> = self
            .options
            .effective_macros()
            .map(|(name, body)| (name.trim_start_matches('\\'), body))
            .collect();
        serde_json::to_string(&macros).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for KaTeXRenderer {
    fn default() -> Self {
        Self::new(MathOptions::default())
    }
}

impl MathRenderer for KaTeXRenderer {
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, RenderError> {
        check_tex(latex)?;
        let escaped = escape_html(latex);

        Ok(match mode {
            MathMode::Inline => format!(r"\({}\)", escaped),
            MathMode::Display => format!(r"\[{}\]", escaped),
        })
    }

    fn head_content(&self) -> Option<String> {
        if self.use_mathjax {
            Some(format!(
                r#"<script>
MathJax = {{
    tex: {{
        inlineMath: [['\\(', '\\)']],
        displayMath: [['\\[', '\\]']],
        macros: {}
    }}
}};
</script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>"#,
                self.mathjax_macros_json()
            ))
        } else {
            Some(format!(
                r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css" crossorigin="anonymous">
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js" crossorigin="anonymous"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/contrib/auto-render.min.js" crossorigin="anonymous"
    onload='renderMathInElement(document.body, {});'></script>"#,
                self.client_options_json().replace('\'', "&#39;")
            ))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientOptions<'a> {
    delimiters: Vec<Delimiter>,
    throw_on_error: bool,
    strict: super::Strictness,
    trust: bool,
    macros: BTreeMap<&'a String, &'a String>,
}

#[derive(Serialize)]
struct Delimiter {
    left: &'static str,
    right: &'static str,
    display: bool,
}

/// Structural check of a TeX expression.
///
/// Catches unbalanced braces, unmatched `\left`/`\right` and
/// `\begin`/`\end`, and a trailing lone backslash.
pub(crate) fn check_tex(latex: &str) -> Result<(), RenderError> {
    let mut depth: usize = 0;
    let mut delimiters: isize = 0;
    let mut environments: Vec<String> = Vec::new();
    let mut rest = latex;

    while let Some(c) = rest.chars().next() {
        match c {
            '\\' => {
                let after = &rest[1..];
                let Some(next) = after.chars().next() else {
                    return Err(RenderError::Math("trailing backslash".into()));
                };
                if !next.is_ascii_alphabetic() {
                    // Escaped symbol such as \{ or \\
                    rest = &after[next.len_utf8()..];
                    continue;
                }
                let len = after
                    .find(|ch: char| !ch.is_ascii_alphabetic())
                    .unwrap_or(after.len());
                let command = &after[..len];
                rest = &after[len..];
                match command {
                    "left" => delimiters += 1,
                    "right" => {
                        delimiters -= 1;
                        if delimiters < 0 {
                            return Err(RenderError::Math("\\right without \\left".into()));
                        }
                    }
                    "begin" => environments.push(environment_name(rest)?),
                    "end" => {
                        let name = environment_name(rest)?;
                        match environments.pop() {
                            Some(open) if open == name => {}
                            Some(open) => {
                                return Err(RenderError::Math(format!(
                                    "\\end{{{}}} closes \\begin{{{}}}",
                                    name, open
                                )))
                            }
                            None => {
                                return Err(RenderError::Math(format!(
                                    "\\end{{{}}} without \\begin",
                                    name
                                )))
                            }
                        }
                    }
                    _ => {}
                }
            }
            '{' => {
                depth += 1;
                rest = &rest[1..];
            }
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| RenderError::Math("unexpected '}'".into()))?;
                rest = &rest[1..];
            }
            other => rest = &rest[other.len_utf8()..],
        }
    }

    if depth > 0 {
        return Err(RenderError::Math("unclosed '{'".into()));
    }
    if delimiters > 0 {
        return Err(RenderError::Math("\\left without \\right".into()));
    }
    if let Some(open) = environments.pop() {
        return Err(RenderError::Math(format!("unclosed \\begin{{{}}}", open)));
    }
    Ok(())
}

fn environment_name(input: &str) -> Result<String, RenderError> {
    let input = input.trim_start();
    input
        .strip_prefix('{')
        .and_then(|rest| rest.find('}').map(|end| rest[..end].to_string()))
        .ok_or_else(|| RenderError::Math("missing environment name".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_math() {
        let renderer = KaTeXRenderer::default();
        let result = renderer.render("E = mc^2", MathMode::Inline).unwrap();
        assert_eq!(result, r"\(E = mc^2\)");
    }

    #[test]
    fn test_display_math() {
        let renderer = KaTeXRenderer::default();
        let result = renderer.render("\\int_0^1 x dx", MathMode::Display).unwrap();
        assert_eq!(result, r"\[\int_0^1 x dx\]");
    }

    #[test]
    fn test_escaping() {
        let renderer = KaTeXRenderer::default();
        let result = renderer.render("a < b", MathMode::Inline).unwrap();
        assert!(result.contains("&lt;"));
    }

    #[test]
    fn test_malformed_tex_is_rejected() {
        assert!(check_tex("\\frac{1}{2").is_err());
        assert!(check_tex("a}").is_err());
        assert!(check_tex("\\left( x").is_err());
        assert!(check_tex("x \\right)").is_err());
        assert!(check_tex("\\begin{matrix} a").is_err());
        assert!(check_tex("\\begin{matrix} a \\end{cases}").is_err());
        assert!(check_tex("x \\").is_err());
    }

    #[test]
    fn test_wellformed_tex_passes() {
        assert!(check_tex("\\left( \\frac{a}{b} \\right)").is_ok());
        assert!(check_tex("\\{ x \\} \\\\ y").is_ok());
        assert!(check_tex("\\begin{pmatrix} 1 & 0 \\\\ 0 & 1 \\end{pmatrix}").is_ok());
        assert!(check_tex("\\text{für alle } x").is_ok());
    }

    #[test]
    fn test_katex_head_carries_options() {
        let head = KaTeXRenderer::default().head_content().unwrap();
        assert!(head.contains("katex.min.js"));
        assert!(head.contains(r#""throwOnError":false"#));
        assert!(head.contains(r#""strict":"warn""#));
        assert!(head.contains(r#""trust":true"#));
        assert!(head.contains(r#""\\RR":"\\mathbb{R}""#));
    }

    #[test]
    fn test_mathjax_head() {
        let head = KaTeXRenderer::new_mathjax(MathOptions::default())
            .head_content()
            .unwrap();
        assert!(head.contains("MathJax"));
        assert!(head.contains(r#""RR":"\\mathbb{R}""#));
    }
}
