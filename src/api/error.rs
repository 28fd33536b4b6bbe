//! Error taxonomy for the request gateway.

use thiserror::Error;

/// Errors surfaced by the authenticated request gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Session is no longer usable: a 401 that could not be recovered by a
    /// refresh (no refresh token, refresh exchange failed, or a second 401
    /// after retry). Carries the original request's failure, not the
    /// refresh call's. Stored tokens have been cleared where applicable;
    /// the caller should direct the user back to `login`.
    #[error("Session expired (HTTP {status}): {message}. Run 'yonna-cli login'.")]
    SessionExpired { status: u16, message: String },

    /// 4xx with a backend-provided detail message. Not retried.
    #[error("Request rejected (HTTP {status}): {detail}")]
    Validation { status: u16, detail: String },

    /// 5xx from the backend. Not retried.
    #[error("Server error (HTTP {status}): {message}. Try again later.")]
    Server { status: u16, message: String },

    /// Transport-level failure (DNS, connect, TLS, timeout). No token-state
    /// change is made for these.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered 2xx but the body did not parse as the expected
    /// JSON shape.
    #[error("Malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Classify a non-401 error status plus its body text.
    ///
    /// DRF-style bodies carry a `detail` string; when present it is surfaced
    /// verbatim, otherwise the raw body stands in.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let message = extract_detail(&body).unwrap_or(body);
        if status.is_server_error() {
            Self::Server {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::Validation {
                status: status.as_u16(),
                detail: message,
            }
        }
    }
}

/// Pull the `detail` field out of a JSON error body, if there is one.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(String::from)
}
