//! API error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! 401 is the only status with a recovery path (refresh-and-retry inside
//! `ApiClient`); everything else surfaces here and pages turn it into a
//! message with [`ApiError::user_message`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("server returned {status}")]
    Status { status: u16, body: String },
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no refresh token stored")]
    MissingRefreshToken,
    #[error("session expired")]
    SessionExpired,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best-effort human message: the server's `detail`/`message` field when
    /// present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { body, .. } => server_message(body).unwrap_or_else(|| fallback.to_owned()),
            Self::SessionExpired => "Session expired. Please log in again.".to_owned(),
            Self::Timeout => "Server is taking too long to respond. Please try again.".to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

/// Pull `detail` or `message` out of a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
        .filter(|msg| !msg.trim().is_empty())
}
