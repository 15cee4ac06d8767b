//! MathML renderer.

use super::katex::check_tex;
use super::macros::expand_macros;
use super::{MathMode, MathOptions, MathRenderer};
use crate::error::RenderError;
#[cfg(not(feature = "mathml"))]
use crate::render::escape_html;

/// Renderer that converts LaTeX to MathML.
///
/// Course macros are expanded textually first since the converter has no
/// macro table of its own.
pub struct MathMLRenderer {
    options: MathOptions,
}

impl MathMLRenderer {
    /// Create a new MathML renderer.
    pub fn new(options: MathOptions) -> Self {
        Self { options }
    }
}

impl Default for MathMLRenderer {
    fn default() -> Self {
        Self::new(MathOptions::default())
    }
}

impl MathRenderer for MathMLRenderer {
    fn render(&self, latex: &str, mode: MathMode) -> Result<String, RenderError> {
        check_tex(latex)?;
        let latex = expand_macros(latex, &self.options.macros);

        #[cfg(feature = "mathml")]
        {
            let style = match mode {
                MathMode::Inline => latex2mathml::DisplayStyle::Inline,
                MathMode::Display => latex2mathml::DisplayStyle::Block,
            };
            latex2mathml::latex_to_mathml(&latex, style)
                .map_err(|e| RenderError::Math(e.to_string()))
        }

        #[cfg(not(feature = "mathml"))]
        {
            // Without the mathml feature, fall back to escaped LaTeX
            Ok(match mode {
                MathMode::Inline => format!(r"\({}\)", escape_html(&latex)),
                MathMode::Display => format!(r"\[{}\]", escape_html(&latex)),
            })
        }
    }

    fn head_content(&self) -> Option<String> {
        Some(MATHML_STYLES.to_string())
    }
}

const MATHML_STYLES: &str = r#"<style>
math {
    font-size: 1.1em;
}
</style>"#;
