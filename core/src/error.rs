//! Error types for the auth client.
//!
//! # Design
//! `NoActiveSession` gets a dedicated variant so callers must decide what an
//! anonymous visitor means for them instead of tripping over a missing user.
//! Transport failures are wrapped without rewriting, so the caller sees the
//! same error the transport produced. All other non-2xx responses land in
//! `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Failure to execute an HTTP round-trip (connect, TLS, read).
///
/// Status codes are never transport errors; a 500 is a successful round-trip
/// carrying an unhappy response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Errors returned while assembling a `ClientConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(String),

    #[error("could not load env file {0}")]
    EnvFile(String),

    #[error("{0} must not be empty")]
    Empty(String),

    #[error("invalid service url {0:?}: expected http:// or https://")]
    InvalidUrl(String),
}

/// Errors returned by the auth client and its accessors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No user is signed in on this client.
    #[error("no active session")]
    NoActiveSession,

    /// The service refused the public API key; the client is misconfigured.
    #[error("invalid API key: {body}")]
    InvalidApiKey { body: String },

    /// The service rejected the access token.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// Email/password sign-in was refused.
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// The server returned an unexpected non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
