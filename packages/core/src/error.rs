//! Error types shared by every fileserve layer.
//!
//! A lookup that finds nothing is not an error: resolution functions return
//! `Ok(None)` for that. The variants here cover malformed requests, broken
//! configuration, and failures bubbling up from I/O or JSON decoding.

/// Errors raised while resolving or configuring mounts.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The caller violated the lookup contract (e.g. an empty module path).
    #[error("{message}")]
    Usage { message: String },

    /// A mount name contains characters outside `[-\w]`.
    #[error("Cannot find file: Invalid mount '{name}'")]
    InvalidMount { name: String },

    /// A mount configuration cannot be turned into a usable mount.
    #[error("invalid mount configuration: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The usage error raised when a module-scoped path names no module.
    pub fn no_module_specified() -> Self {
        Error::Usage {
            message: "No module specified".to_string(),
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage { .. })
    }
}
