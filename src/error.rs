//! Shared error types.

use thiserror::Error;

/// Errors surfaced by key-value storage backends and progress persistence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored progress could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("progress could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors emitted by certificate generation.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("a name is required for the certificate")]
    EmptyName,

    #[error("the hunt is not finished yet")]
    NotFinished,
}

/// Errors emitted while exporting a certificate image.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExportError {
    #[error("certificate rendering failed: {0}")]
    Render(String),

    #[error("certificate image could not be encoded: {0}")]
    Encode(String),
}

/// Errors emitted while reading configuration overrides.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid hunt configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
