//! Blocking HTTP transport with retry
//!
//! One call to [`Transport::execute`] is one logical operation: up to
//! [`RetryPolicy::max_attempts`] network attempts, exponential backoff
//! between them, a longer fixed pause after a 429, and immediate failure on
//! anything a retry cannot fix.
//!
//! The request body is held as bytes in [`Request`] and cloned into every
//! attempt, so each retry sends exactly what the first attempt sent.

use std::fmt;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use super::classify;
use super::error::ApiError;

/// Production API base address
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("todoist-cli/", env!("CARGO_PKG_VERSION"));

/// Timing and budget for one logical request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause before the first retry; doubles for each further retry
    pub initial_backoff: Duration,
    /// Pause before a retry that follows a 429
    pub rate_limit_wait: Duration,
    /// Deadline for a single attempt
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff: Duration::from_secs(1),
            rate_limit_wait: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `retry` (1-based): 1, 2, 4, ... units
    #[must_use]
    pub const fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }

    /// Pause before retry number `retry`, given the error that ended the
    /// previous attempt
    #[must_use]
    pub const fn delay_after(&self, previous: &ApiError, retry: u32) -> Duration {
        if matches!(previous, ApiError::RateLimit { .. }) {
            self.rate_limit_wait
        } else {
            self.backoff(retry)
        }
    }
}

/// HTTP verbs the API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One logical request. The body is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP verb
    pub method: HttpMethod,
    /// Path relative to the base URL, including any query string
    pub path: String,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Request without a body
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Request with a JSON body, serialized up front
    pub fn with_json<T: Serialize>(
        method: HttpMethod,
        path: impl Into<String>,
        payload: &T,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(payload).map_err(|e| ApiError::decode("request body", e))?;
        Ok(Self {
            method,
            path: path.into(),
            body: Some(body),
        })
    }

    /// Captured body bytes
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Per-invocation HTTP transport carrying the credential and base address
pub struct Transport {
    http: Client,
    base_url: String,
    token: String,
    policy: RetryPolicy,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Build a transport. A trailing slash on `base_url` is ignored.
    pub fn new(
        token: impl Into<String>,
        base_url: &str,
        policy: RetryPolicy,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(policy.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            policy: RetryPolicy {
                max_attempts: policy.max_attempts.max(1),
                ..policy
            },
        })
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Active retry policy
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute one logical request, retrying transient failures.
    ///
    /// Returns the first 2xx response. 401 and other non-retryable 4xx fail
    /// after a single attempt. Network failures, 5xx and 429 are retried
    /// until the budget is spent, after which [`ApiError::Exhausted`] wraps
    /// the last failure.
    pub fn execute(&self, request: &Request) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut last: Option<ApiError> = None;

        for attempt in 1..=self.policy.max_attempts {
            if let Some(previous) = &last {
                let delay = self.policy.delay_after(previous, attempt - 1);
                debug!("waiting {delay:?} before attempt {attempt}");
                thread::sleep(delay);
            }

            debug!(
                "{} {} (attempt {attempt}/{})",
                request.method, request.path, self.policy.max_attempts
            );

            match self.attempt(&url, request) {
                Ok(response) => {
                    debug!("{} {} -> {}", request.method, request.path, response.status);
                    return Ok(response);
                },
                Err(err) if err.is_retryable() => {
                    warn!("attempt {attempt} failed: {err}");
                    last = Some(err);
                },
                Err(err) => return Err(err),
            }
        }

        let last = last.unwrap_or_else(|| ApiError::network("no attempt was made"));
        Err(ApiError::Exhausted {
            attempts: self.policy.max_attempts,
            last: Box::new(last),
        })
    }

    fn attempt(&self, url: &str, request: &Request) -> Result<Response, ApiError> {
        let mut builder = self
            .http
            .request(request.method.into(), url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(ApiError::network)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(ApiError::network)?.to_vec();

        if classify::is_success(status) {
            Ok(Response { status, body })
        } else {
            Err(classify::classify(status, &body, self.policy.rate_limit_wait.as_secs()))
        }
    }
}
