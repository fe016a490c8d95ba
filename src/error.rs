//! API error type and server validation-error mapping.
//!
//! ERROR HANDLING
//! ==============
//! Errors are not translated on the way up. A non-success response keeps its
//! status and raw body so the call site decides what to show; the helpers
//! here only read that body, they never replace it.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::net::session::SessionError;

/// Body keys the backend uses for errors that belong to no single field.
const GENERAL_ERROR_KEYS: &[&str] = &["non_field_errors", "detail"];

/// Errors produced by API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16, body: Value },

    /// A request payload could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// A success response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The access token was rejected and the refresh exchange failed.
    #[error("session expired; log in again")]
    SessionExpired,

    /// Reading or writing the persisted session failed.
    #[error("session store error: {0}")]
    Session(#[from] SessionError),

    /// A file selected for upload could not be read.
    #[error("failed reading upload {path}: {source}")]
    Upload { path: String, source: std::io::Error },
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Field validation errors carried by a `400` response, if any.
    #[must_use]
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Status { status: 400, body } => FieldErrors::from_body(body),
            _ => None,
        }
    }

    /// One-line message suitable for a transient notice.
    #[must_use]
    pub fn notice(&self) -> String {
        if let Some(errors) = self.field_errors() {
            return errors.summary();
        }
        if let Self::Status { status, body } = self {
            if let Some(detail) = body.get("detail").and_then(Value::as_str) {
                return format!("{detail} ({status})");
            }
        }
        self.to_string()
    }
}

/// Server validation errors reduced to the first message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub fields: BTreeMap<String, String>,
    pub general: Vec<String>,
}

impl FieldErrors {
    /// Parse a `{field: [messages...]}` body.
    ///
    /// Fields whose value is a bare string are accepted as a single message.
    /// Returns `None` when the body is not an object or carries no messages.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let map = body.as_object()?;
        let mut errors = Self::default();
        for (key, value) in map {
            let Some(first) = first_message(value) else {
                continue;
            };
            if GENERAL_ERROR_KEYS.contains(&key.as_str()) {
                errors.general.push(first);
            } else {
                errors.fields.insert(key.clone(), first);
            }
        }
        if errors.is_empty() { None } else { Some(errors) }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    /// Message attached to `field`, if the server rejected it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self.general.clone();
        parts.extend(self.fields.iter().map(|(field, msg)| format!("{field}: {msg}")));
        parts.join("; ")
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
