//! API error taxonomy
//!
//! Every failed call ends in exactly one [`ApiError`] variant. The variant
//! decides whether the transport may try again ([`ApiError::is_retryable`])
//! and what the CLI shows to the user ([`ApiError::message`] and
//! [`ApiError::status`]).

use thiserror::Error;

use super::classify;

/// Broad category of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential missing or rejected (401)
    Auth,
    /// Upstream rate limiting (429)
    RateLimit,
    /// Malformed or rejected request (other 4xx)
    ClientError,
    /// Upstream failure (5xx)
    ServerError,
    /// No response was obtained
    Network,
    /// Response body did not match the expected schema
    Decode,
    /// A success status other than the one the operation expects
    UnexpectedStatus,
}

impl ErrorKind {
    /// Stable lowercase name, used in JSON error output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::Network => "network",
            Self::Decode => "decode",
            Self::UnexpectedStatus => "unexpected_status",
        }
    }
}

/// A classified API failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The access token was rejected (401)
    #[error("[Todoist] {message} (HTTP 401)")]
    Auth {
        /// Human-readable message
        message: String,
    },

    /// No access token was supplied; nothing was sent
    #[error("access token is required")]
    MissingToken,

    /// The API asked us to slow down (429)
    #[error("[Todoist] {message} (HTTP 429)")]
    RateLimit {
        /// Human-readable message
        message: String,
    },

    /// The API rejected the request (4xx other than 401/429)
    #[error("[Todoist] {message} (HTTP {status})")]
    Client {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The API failed to handle the request (5xx)
    #[error("[Todoist] {message} (HTTP {status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The request never produced a response
    #[error("request failed: {message}")]
    Network {
        /// Description of the transport failure
        message: String,
    },

    /// The response could not be decoded
    #[error("failed to parse {what}: {message}")]
    Decode {
        /// What was being decoded (e.g. "tasks")
        what: String,
        /// Decoder error
        message: String,
    },

    /// A 2xx status other than the expected one
    #[error("unexpected status code: {actual} (expected {expected})")]
    UnexpectedStatus {
        /// Status the operation expects
        expected: u16,
        /// Status actually received
        actual: u16,
    },

    /// The attempt budget ran out; `last` is the final attempt's error
    #[error("request failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error recorded for the last attempt
        last: Box<ApiError>,
    },
}

impl ApiError {
    /// Category of this error. `Exhausted` reports the category of the
    /// final attempt.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth { .. } | Self::MissingToken => ErrorKind::Auth,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Client { .. } => ErrorKind::ClientError,
            Self::Server { .. } => ErrorKind::ServerError,
            Self::Network { .. } => ErrorKind::Network,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Exhausted { last, .. } => last.kind(),
        }
    }

    /// Human-readable message without the status decoration
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Auth { message }
            | Self::RateLimit { message }
            | Self::Client { message, .. }
            | Self::Server { message, .. }
            | Self::Network { message } => message.clone(),
            Self::MissingToken
            | Self::Decode { .. }
            | Self::UnexpectedStatus { .. }
            | Self::Exhausted { .. } => self.to_string(),
        }
    }

    /// HTTP status associated with the error, 0 when no response was obtained
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Auth { .. } => 401,
            Self::RateLimit { .. } => 429,
            Self::Client { status, .. } | Self::Server { status, .. } => *status,
            Self::MissingToken | Self::Network { .. } | Self::Decode { .. } => 0,
            Self::UnexpectedStatus { actual, .. } => *actual,
            Self::Exhausted { last, .. } => last.status(),
        }
    }

    /// Whether another attempt could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Server { .. } => classify::is_retryable(self.status()),
            Self::Network { .. } => true,
            Self::Auth { .. }
            | Self::MissingToken
            | Self::Client { .. }
            | Self::Decode { .. }
            | Self::UnexpectedStatus { .. }
            | Self::Exhausted { .. } => false,
        }
    }

    /// Whether the budget ran out before a terminal answer
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Network failure from any displayable cause
    #[must_use]
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }

    /// Decode failure while parsing `what`
    #[must_use]
    pub fn decode(what: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            what: what.to_string(),
            message: err.to_string(),
        }
    }
}
