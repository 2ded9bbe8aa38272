//! Client error types
//!
//! Every failed round trip ends up as one [`ClientError`]. The user-action
//! layer turns it into banner text; nothing here is fatal.

use thiserror::Error;

/// Errors that can occur while talking to the users API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused, timeout)
    #[error("{0}")]
    Network(String),

    /// Non-2xx response without a usable `detail` message
    #[error("{reason}")]
    Status { status: u16, reason: String },

    /// Non-2xx response carrying a server-provided `detail` message
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// A 2xx response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// The two error kinds the UI distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkOrStatus,
    ApiDetail,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Api { .. } => ErrorKind::ApiDetail,
            ClientError::Network(_) | ClientError::Status { .. } | ClientError::Decode(_) => {
                ErrorKind::NetworkOrStatus
            }
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } | ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(_) | ClientError::Decode(_) => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Pull the server's `detail` message out of an error body.
///
/// Accepts a plain string (`{"detail": "mail taken"}`) or a list of
/// validation entries (`{"detail": [{"msg": "..."}]}`), whose messages are
/// joined with `"; "`. Anything else yields `None`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let detail = value.get("detail")?;

    let text = match detail {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Array(entries) => entries
            .iter()
            .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
