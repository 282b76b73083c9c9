//! Request error taxonomy.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Key the server uses for messages that belong to no single field
const NON_FIELD_KEY: &str = "__all__";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Pre-flight: no token, nothing was sent
    #[error("anti-forgery token not found")]
    MissingToken,

    /// The request never reached the server or no answer came back
    #[error("network error: {0}")]
    Network(String),

    /// 5xx, or a body that could not be understood
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The server rejected the submitted values
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
}

impl RequestError {
    /// Text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            RequestError::MissingToken => "Your session has expired. Please refresh the page.".to_string(),
            RequestError::Network(_) => "Could not reach the server. Please try again.".to_string(),
            RequestError::Server { .. } => "Something went wrong on the server.".to_string(),
            RequestError::Validation(errors) => errors
                .message
                .clone()
                .unwrap_or_else(|| "Please check the highlighted fields.".to_string()),
        }
    }
}

/// Field-level validation messages plus an optional form-level message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            message: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.message.is_none()
    }

    pub fn for_field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read `{ field: [messages] }` (or `{ field: "message" }`).
    /// Messages under `__all__` become the form-level message.
    pub fn from_json(errors: &Value) -> Option<Self> {
        let map = errors.as_object()?;
        let mut out = FieldErrors::default();

        for (field, value) in map {
            let messages: Vec<String> = match value {
                Value::Array(list) => list.iter().filter_map(message_text).collect(),
                other => message_text(other).into_iter().collect(),
            };
            if messages.is_empty() {
                continue;
            }
            if field == NON_FIELD_KEY {
                out.message = Some(messages.join(" "));
            } else {
                out.fields.insert(field.clone(), messages);
            }
        }

        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

/// Django sometimes sends `{ "message": "...", "code": "..." }` objects
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("message").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        for (field, messages) in &self.fields {
            parts.push(format!("{}: {}", field, messages.join(", ")));
        }
        f.write_str(&parts.join("; "))
    }
}
