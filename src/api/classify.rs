//! Response classification
//!
//! Turns a status code and raw body into one [`ApiError`]. The predicates
//! here are the only place status ranges are interpreted; the transport
//! consults them and nothing else.

use reqwest::StatusCode;
use serde::Deserialize;

use super::error::ApiError;

/// Message used for every 401
pub const AUTH_MESSAGE: &str = "Unauthorized: Invalid or missing access token";

/// 401
#[must_use]
pub const fn is_auth(status: u16) -> bool {
    status == 401
}

/// 429
#[must_use]
pub const fn is_rate_limit(status: u16) -> bool {
    status == 429
}

/// 500..=599
#[must_use]
pub const fn is_server_error(status: u16) -> bool {
    status >= 500 && status <= 599
}

/// 400..=499 except 401 and 429
#[must_use]
pub const fn is_client_error(status: u16) -> bool {
    status >= 400 && status <= 499 && !is_auth(status) && !is_rate_limit(status)
}

/// Rate limiting or a server error
#[must_use]
pub const fn is_retryable(status: u16) -> bool {
    is_rate_limit(status) || is_server_error(status)
}

/// 200..=299
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status <= 299
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extract the human-readable message from an error body.
///
/// Accepted shapes, in priority order: `{"error": "X"}`, `"X"`, raw text
/// `X`. An empty body yields `HTTP <code>: <reason phrase>`.
#[must_use]
pub fn extract_message(status: u16, body: &[u8]) -> String {
    if body.is_empty() {
        return format!("HTTP {status}: {}", reason_phrase(status));
    }

    if let Ok(ErrorBody { error: Some(message) }) = serde_json::from_slice::<ErrorBody>(body) {
        if !message.is_empty() {
            return message;
        }
    }

    match serde_json::from_slice::<String>(body) {
        Ok(message) if !message.is_empty() => return message,
        _ => {},
    }

    String::from_utf8_lossy(body).into_owned()
}

/// Rate limit message for a window of `seconds`
#[must_use]
pub fn rate_limit_message(seconds: u64) -> String {
    format!("Rate limit exceeded. Retry after {seconds} seconds")
}

/// Classify a non-success response.
///
/// `rate_limit_secs` only feeds the message of a 429. Callers must not pass
/// 2xx statuses; a stray one is reported as [`ApiError::UnexpectedStatus`].
#[must_use]
pub fn classify(status: u16, body: &[u8], rate_limit_secs: u64) -> ApiError {
    if is_auth(status) {
        ApiError::Auth {
            message: AUTH_MESSAGE.to_string(),
        }
    } else if is_rate_limit(status) {
        ApiError::RateLimit {
            message: rate_limit_message(rate_limit_secs),
        }
    } else if is_server_error(status) {
        ApiError::Server {
            status,
            message: extract_message(status, body),
        }
    } else if is_client_error(status) {
        ApiError::Client {
            status,
            message: extract_message(status, body),
        }
    } else if is_success(status) {
        ApiError::UnexpectedStatus {
            expected: 200,
            actual: status,
        }
    } else {
        // 1xx/3xx never reach us through reqwest's redirect handling; treat
        // anything else as a client-side problem.
        ApiError::Client {
            status,
            message: extract_message(status, body),
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
}
