//! Block segmentation for module content.

mod block;
pub(crate) mod lexer;

pub use block::parse_fragments;
