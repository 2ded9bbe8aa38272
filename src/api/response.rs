//! Response classification
//!
//! Transport-independent: a transport collects status, status text and body
//! into [`ResponseParts`], and these functions decide between success, a
//! status error and a detail error.

use serde::de::DeserializeOwned;

use super::Operation;
use crate::error::{extract_detail, ClientError, ClientResult};
use crate::model::Record;

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParts {
    pub status: u16,
    /// Reason phrase; may be empty (HTTP/2 has none)
    pub status_text: String,
    pub body: Vec<u8>,
}

impl ResponseParts {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reason phrase, falling back to the numeric status
    pub fn reason(&self) -> String {
        if self.status_text.trim().is_empty() {
            self.status.to_string()
        } else {
            self.status_text.clone()
        }
    }
}

/// Turn a non-2xx response into the error for `op`
pub fn failure(op: Operation, parts: &ResponseParts) -> ClientError {
    if op.uses_detail() {
        if let Some(detail) = extract_detail(&parts.body) {
            return ClientError::Api {
                status: parts.status,
                detail,
            };
        }
    }

    let reason = match op {
        Operation::List => format!("{}: {}", op.failure_message(), parts.reason()),
        _ => op.failure_message().to_string(),
    };

    ClientError::Status {
        status: parts.status,
        reason,
    }
}

/// Fail unless the response is 2xx
pub fn check(op: Operation, parts: &ResponseParts) -> ClientResult<()> {
    if parts.is_success() {
        Ok(())
    } else {
        Err(failure(op, parts))
    }
}

fn decode<T: DeserializeOwned>(op: Operation, parts: &ResponseParts) -> ClientResult<T> {
    check(op, parts)?;
    Ok(serde_json::from_slice(&parts.body)?)
}

/// `GET /users` response
pub fn decode_list(parts: &ResponseParts) -> ClientResult<Vec<Record>> {
    decode(Operation::List, parts)
}

/// `POST /users` or `PUT /users/{id}` response
pub fn decode_record(op: Operation, parts: &ResponseParts) -> ClientResult<Record> {
    decode(op, parts)
}

/// `DELETE /users/{id}` response; any 2xx body is accepted
pub fn decode_deleted(parts: &ResponseParts) -> ClientResult<()> {
    check(Operation::Delete, parts)
}
