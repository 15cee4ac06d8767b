//! # lessonmark
//!
//! Renders training modules written in a small markdown dialect mixed with
//! LaTeX into styled HTML, and tracks a learner's progress through them.
//!
//! ## Features
//!
//! - **Line-oriented formatting**: headings (`#` to `####`), bullet and
//!   numbered lines, fenced code, standalone `$...$` math lines, paragraphs
//! - **Inline formatting**: `$$...$$`, `$...$`, `**bold**`, `*italic*` and
//!   `` `code` ``, applied in that fixed order
//! - **Math rendering**: KaTeX (default), MathJax or MathML backends with a
//!   repair pass for expressions written without backslashes
//! - **Sessions**: overview grid, module views, completion tracking
//! - **Course files**: TOML catalogs with math and HTML settings
//!
//! ## Quick Start
//!
//! ```rust
//! use lessonmark::{render, Catalog, Session};
//!
//! let html = render("# Hello\n\nThe **key** idea: $x^2$.", None);
//! assert!(html.contains("<strong>key</strong>"));
//!
//! let catalog = Catalog::from_toml_str(r##"
//! [[modules]]
//! id = "intro"
//! title = "Introduction"
//! content = "# Welcome"
//! "##).unwrap();
//!
//! let mut session = Session::new(catalog);
//! session.select_module("intro").unwrap();
//! session.mark_complete("intro").unwrap();
//! assert_eq!(session.progress().percent, 100);
//! ```
//!
//! ## Syntax Reference
//!
//! Each line is classified on its own; there is no nesting.
//!
//! ~~~text
//! # Heading            (#### is the deepest level)
//! - bullet             (* also works)
//! 1. numbered
//! $E = mc^2$           (a whole line of math renders as a display block)
//! ```
//! verbatim code, never formatted
//! ```
//! ~~~
//!
//! Heading text is not inline formatted.
//!
//! ## Cargo Features
//!
//! - `mathml`: Enable MathML rendering backend (requires `latex2mathml` crate)
//! - `wasm`: Enable WebAssembly bindings (requires `wasm-bindgen`)

pub mod ast;
pub mod catalog;
pub mod error;
pub mod parser;
pub mod render;
pub mod session;
pub mod toc;

// WASM module (only with feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Convenience re-exports
pub use ast::Fragment;
pub use catalog::{Catalog, Module};
pub use error::{CatalogError, Error, RenderError, Result, SessionError};
pub use parser::parse_fragments;
pub use render::{render_html, HtmlConfig, MathBackend, MathOptions};
pub use session::{CompletionSet, Progress, Session, ViewState};
pub use toc::{table_of_contents, TocEntry};

/// Render module content to HTML in one step.
///
/// Uses [`HtmlConfig::default`] when no config is given. Rendering never
/// fails; malformed math shows up as a flagged fragment in the output.
///
/// # Example
///
/// ```rust
/// use lessonmark::render;
///
/// let html = render("# Hello *world*", None);
/// assert!(html.contains("<h1"));
/// ```
pub fn render(content: &str, config: Option<&HtmlConfig>) -> String {
    match config {
        Some(config) => render_html(content, config),
        None => render_html(content, &HtmlConfig::default()),
    }
}
