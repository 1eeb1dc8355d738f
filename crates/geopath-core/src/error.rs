// crates/geopath-core/src/error.rs
use thiserror::Error;

/// Every failure the crate can report.
///
/// A path that names nothing is *not* an error: it resolves to
/// [`RouteDescriptor::NotFound`](crate::RouteDescriptor::NotFound).
/// Errors are reserved for situations where the answer is unknown,
/// most importantly [`GeoPathError::Lookup`] when the backend could not
/// be asked.
#[derive(Debug, Error)]
pub enum GeoPathError {
    /// A lookup against the data source failed (unreachable, rejected,
    /// undecodable). Distinct from an empty collection.
    #[error("lookup of {collection} failed: {message}")]
    Lookup {
        collection: &'static str,
        message: String,
    },

    /// A dataset or configuration file could not be located.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid or missing configuration (environment, route table).
    #[error("configuration error: {0}")]
    Config(String),

    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dataset violates a referential or uniqueness rule.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl GeoPathError {
    /// Shorthand for a [`GeoPathError::Lookup`].
    pub fn lookup(collection: &'static str, message: impl Into<String>) -> Self {
        GeoPathError::Lookup {
            collection,
            message: message.into(),
        }
    }

    /// `true` when repeating the same operation later may succeed.
    ///
    /// Front ends use this to show a retry banner instead of a 404 view.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeoPathError::Lookup { .. } => true,
            #[cfg(feature = "remote")]
            GeoPathError::Http(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoPathError>;
