//! Error types for the exporter.

use thiserror::Error;

/// Main error type for host scene parsing and configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// A type or mode combination that has no renderer counterpart.
    #[error("Unsupported configuration: {what} '{value}'")]
    UnsupportedConfiguration {
        /// The setting being selected on (e.g. "light type").
        what: &'static str,
        /// The value found in the host data.
        value: String,
    },

    /// A required texture or color reference is not assigned.
    #[error("Missing reference: '{owner}' requires '{field}'")]
    MissingReference {
        /// Name of the host object that needs the reference.
        owner: String,
        /// The unassigned field.
        field: &'static str,
    },

    /// Host scene description could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be decoded
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::UnsupportedConfiguration`].
    pub fn unsupported(what: &'static str, value: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration {
            what,
            value: value.into(),
        }
    }

    /// Shorthand for [`Error::MissingReference`].
    pub fn missing(owner: impl Into<String>, field: &'static str) -> Self {
        Self::MissingReference {
            owner: owner.into(),
            field,
        }
    }
}

/// Result type alias using the exporter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = Error::unsupported("sun mode", "moon");
        assert_eq!(err.to_string(), "Unsupported configuration: sun mode 'moon'");
    }

    #[test]
    fn test_missing_message() {
        let err = Error::missing("World", "env_tex");
        assert_eq!(
            err.to_string(),
            "Missing reference: 'World' requires 'env_tex'"
        );
    }
}
