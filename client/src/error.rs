//! Error types for the Presensi client.

use thiserror::Error;

/// All possible errors from a client call.
///
/// Public operations fold these into conservative return values; the
/// extracted diagnostic stays queryable on the client afterwards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    // Transport errors
    #[error("transport failure: {0}")]
    Transport(String),

    // Protocol errors
    #[error("unexpected status {code}: {diagnostic}")]
    Status { code: u16, diagnostic: String },

    #[error("malformed response body: {0}")]
    Deserialization(String),

    // Resolution errors
    #[error("no match in '{resource}' for key '{key}'")]
    NotFound { resource: String, key: String },
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
