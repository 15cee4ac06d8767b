//! Error types for the lessonmark library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while loading or building a module catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid course file: {0}")]
    Toml(String),

    #[error("Duplicate module id: {0}")]
    DuplicateId(String),

    #[error("Module at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Unknown math backend: {0}")]
    UnknownBackend(String),
}

/// Errors raised by navigation actions on a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

/// Errors produced by math backends.
///
/// These never leave [`crate::render::math::MathTypesetter`]; they are turned
/// into a visible error fragment instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Math rendering error: {0}")]
    Math(String),
}
