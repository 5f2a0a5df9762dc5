//! Crate-level error types.
//!
//! Malformed CSS never produces an error: the parser recovers and records a
//! diagnostic instead. Errors are reserved for the empty-document case, file
//! I/O, and configuration loading.

use std::path::PathBuf;

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors from [`crate::CssTidy`].
#[derive(Debug, thiserror::Error)]
pub enum TidyError {
    #[error("input produced an empty document")]
    EmptyDocument,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_message() {
        assert_eq!(
            TidyError::EmptyDocument.to_string(),
            "input produced an empty document"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = TidyError::Io {
            path: PathBuf::from("missing.css"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let text = err.to_string();
        assert!(text.contains("missing.css"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_converts() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: TidyError = ConfigError::from(toml_err).into();
        assert!(matches!(err, TidyError::Config(ConfigError::Toml(_))));
    }
}
