//! Renderer-side error types.

use thiserror::Error;

/// Error type for renderer container operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RendererError {
    /// An entity with the same name already lives in the container
    #[error("Duplicate {container} name: '{name}'")]
    DuplicateName {
        /// Kind of entity held by the container
        container: &'static str,
        name: String,
    },

    /// A handle that does not belong to the container
    #[error("Invalid {container} handle: {index}")]
    InvalidHandle {
        container: &'static str,
        index: usize,
    },

    /// No assembly with that name exists in the scene
    #[error("Unknown assembly: '{0}'")]
    UnknownAssembly(String),
}

/// Result type alias for renderer operations.
pub type RendererResult<T> = std::result::Result<T, RendererError>;
