//! Math rendering backends and the non-failing typesetter around them.

mod katex;
mod macros;
mod mathml;
pub mod normalize;

pub use self::katex::KaTeXRenderer;
pub use self::macros::expand_macros;
pub use self::mathml::MathMLRenderer;

use crate::error::RenderError;
use crate::render::{escape_attr, escape_html};
use serde::Serialize;
use std::collections::BTreeMap;

/// Math rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathBackend {
    /// Output escaped TeX for KaTeX auto-render on the client.
    #[default]
    KaTeX,
    /// Convert to MathML for native browser rendering.
    MathML,
    /// Output escaped TeX for MathJax on the client.
    MathJax,
}

impl MathBackend {
    /// Parse a backend name as used in course files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "katex" => Some(MathBackend::KaTeX),
            "mathml" => Some(MathBackend::MathML),
            "mathjax" => Some(MathBackend::MathJax),
            _ => None,
        }
    }
}

/// Inline or display rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Display,
}

impl MathMode {
    pub fn from_display(display: bool) -> Self {
        if display {
            MathMode::Display
        } else {
            MathMode::Inline
        }
    }
}

/// How strictly the typesetter treats non-standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Ignore,
    Warn,
    Error,
}

/// Options handed to every backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MathOptions {
    pub throw_on_error: bool,
    pub strict: Strictness,
    /// Allow commands such as `\text{}` and `\htmlClass{}` that affect layout.
    pub trust: bool,
    /// Macro name (with leading backslash) to replacement.
    pub macros: BTreeMap<String, String>,
}

/// Macros every module can rely on. `\leq` and `\infty` map to themselves.
pub const FIXED_MACROS: &[(&str, &str)] = &[
    ("\\RR", "\\mathbb{R}"),
    ("\\leq", "\\leq"),
    ("\\infty", "\\infty"),
];

impl Default for MathOptions {
    fn default() -> Self {
        Self {
            throw_on_error: false,
            strict: Strictness::Warn,
            trust: true,
            macros: FIXED_MACROS
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        }
    }
}

impl MathOptions {
    /// Default options plus course macros. Fixed macros keep their meaning.
    pub fn with_macros<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut options = Self::default();
        for (name, body) in extra {
            let mut name: String = name.into();
            if !name.starts_with('\\') {
                name.insert(0, '\\');
            }
            options.macros.entry(name).or_insert_with(|| body.into());
        }
        options
    }

    /// Macros that actually rewrite something.
    pub fn effective_macros(&self) -> impl Iterator<Item = (&String, &String)> {
        self.macros.iter().filter(|(name, body)| name != body)
    }
}

/// Trait for math backends.
pub trait MathRenderer {
    /// Render `latex` in the given mode, failing on malformed input.
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, RenderError>;

    /// Get any required HTML head content (scripts, styles).
    fn head_content(&self) -> Option<String>;
}

/// Create a math renderer for the given backend.
pub fn create_renderer(backend: MathBackend, options: &MathOptions) -> Box<dyn MathRenderer> {
    match backend {
        MathBackend::KaTeX => Box::new(KaTeXRenderer::new(options.clone())),
        MathBackend::MathJax => Box::new(KaTeXRenderer::new_mathjax(options.clone())),
        MathBackend::MathML => Box::new(MathMLRenderer::new(options.clone())),
    }
}

/// Backend wrapper used by the formatter.
///
/// Applies normalization to bare expressions and converts any backend
/// failure into a visible error fragment, so `render` never fails.
pub struct MathTypesetter {
    renderer: Box<dyn MathRenderer>,
    error_class: String,
}

impl MathTypesetter {
    pub fn new(backend: MathBackend, options: &MathOptions, class_prefix: &str) -> Self {
        Self::with_renderer(create_renderer(backend, options), class_prefix)
    }

    /// Wrap an arbitrary backend.
    pub fn with_renderer(renderer: Box<dyn MathRenderer>, class_prefix: &str) -> Self {
        Self {
            renderer,
            error_class: format!("{}math-error", class_prefix),
        }
    }

    /// Render an expression. Never fails.
    pub fn render(&self, expression: &str, display: bool) -> String {
        let expression = expression.trim();
        let latex = if normalize::needs_normalization(expression) {
            normalize::normalize(expression)
        } else {
            expression.to_string()
        };

        let markup = match self.renderer.render(&latex, MathMode::from_display(display)) {
            Ok(markup) => markup,
            Err(err) => {
                log::warn!("failed to render math {:?}: {}", expression, err);
                self.error_fragment(expression, &err)
            }
        };
        shield(&markup)
    }

    pub fn head_content(&self) -> Option<String> {
        self.renderer.head_content()
    }

    fn error_fragment(&self, expression: &str, err: &RenderError) -> String {
        format!(
            r#"<span class="{}" style="color: #cc0000; font-family: monospace;" title="{}">{}</span>"#,
            self.error_class,
            escape_attr(&err.to_string()),
            escape_html(expression)
        )
    }
}

/// Encode characters the inline stages treat as markers.
fn shield(markup: &str) -> String {
    markup
        .replace('$', "&#36;")
        .replace('*', "&#42;")
        .replace('`', "&#96;")
}
