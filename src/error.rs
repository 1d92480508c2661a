//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docsite-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the command-line front end.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading an HTML page fails.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The page could not be read from disk.
    #[error("Failed to read page at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The parsed document could not be written back out as HTML.
    #[error("Failed to serialize page: {0}")]
    Serialize(#[source] std::io::Error),
}

/// Error returned for a selector outside the supported `.class`, `#id`, `tag` forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,
    #[error("Unsupported selector '{0}': expected `.class`, `#id` or a tag name")]
    Unsupported(String),
}

/// Error returned when loading the site configuration fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
