//! Error types for scene translation.

use exporter_renderer::RendererError;
use thiserror::Error;

/// Error type for translator operations.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Invalid host data
    #[error(transparent)]
    Scene(#[from] exporter_core::Error),

    /// A container refused an entity
    #[error(transparent)]
    Renderer(#[from] RendererError),

    /// `flush_entities` called before `create_entities`
    #[error("{translator} '{name}' has no entities to flush")]
    NotCreated {
        translator: &'static str,
        name: String,
    },

    /// `flush_entities` called a second time
    #[error("{translator} '{name}' was already flushed")]
    AlreadyFlushed {
        translator: &'static str,
        name: String,
    },
}

/// Result type alias for translator operations.
pub type TranslateResult<T> = std::result::Result<T, TranslateError>;
