//! Error types for `SimPackage`

use thiserror::Error;

/// The error type for `SimPackage` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error while reading or seeking the package stream.
    ///
    /// Truncated packages surface here as [`std::io::ErrorKind::UnexpectedEof`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Package Errors ====================
    /// The file does not start with the `DBPF` tag.
    #[error("invalid package magic: expected DBPF, found {0:?}")]
    InvalidPackageMagic([u8; 4]),

    /// The requested resource is not in the package index.
    #[error("resource not found in package: {0}")]
    ResourceNotFound(String),

    // ==================== Key Errors ====================
    /// A TGI key string could not be parsed.
    #[error("invalid TGI key: {0}")]
    InvalidKey(String),

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `SimPackage` operations.
pub type Result<T> = std::result::Result<T, Error>;
