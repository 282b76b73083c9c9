//! Response classification.

use serde_json::Value;

use super::error::{FieldErrors, RequestError};

/// Longest slice of a non-JSON body kept in a server error
const RAW_EXCERPT_LEN: usize = 200;

/// Turn a status code and body text into data or a classified error.
///
/// - 2xx with JSON: the data, unless the body itself reports failure
///   (`status: "error"` or `success: false`)
/// - 2xx with an empty body: `Value::Null`
/// - 4xx (or a body-level failure) with `errors` or `message`: validation
/// - 5xx, or a body that is not JSON: server error
pub fn classify(status: u16, body: &str) -> Result<Value, RequestError> {
    let ok = (200..300).contains(&status);

    let json = match serde_json::from_str::<Value>(body) {
        Ok(json) => json,
        Err(_) if ok && body.trim().is_empty() => return Ok(Value::Null),
        Err(_) => {
            return Err(RequestError::Server {
                status,
                message: excerpt(body),
            })
        }
    };

    if ok {
        if reports_failure(&json) {
            return Err(failure(status, &json));
        }
        return Ok(json);
    }
    Err(failure(status, &json))
}

fn reports_failure(json: &Value) -> bool {
    json.get("status").and_then(Value::as_str) == Some("error")
        || json.get("success").and_then(Value::as_bool) == Some(false)
}

fn failure(status: u16, json: &Value) -> RequestError {
    let message = json.get("message").and_then(Value::as_str).map(str::to_string);

    if status >= 500 {
        return RequestError::Server {
            status,
            message: message.unwrap_or_else(|| "internal server error".to_string()),
        };
    }

    if let Some(mut errors) = json.get("errors").and_then(FieldErrors::from_json) {
        if errors.message.is_none() {
            errors.message = message;
        }
        return RequestError::Validation(errors);
    }

    match message {
        Some(message) => RequestError::Validation(FieldErrors::message(message)),
        None => RequestError::Server {
            status,
            message: "request rejected without details".to_string(),
        },
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(RAW_EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
