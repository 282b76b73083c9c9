//! HTTP Gateway
//!
//! Every request a panel makes goes through [`HttpGateway`]: it attaches
//! the standard headers and the anti-forgery token, sends through a
//! [`Transport`], and classifies the response. It never touches the DOM
//! and never shows toasts; callers decide how failures are presented.

mod classify;
mod csrf;
mod error;
mod fetch;
mod wire;

#[cfg(test)]
pub mod testing;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

pub use classify::classify;
pub use csrf::DocumentTokenSource;
pub use error::{FieldErrors, RequestError};
pub use fetch::FetchTransport;
pub use wire::{parse_detail, parse_mutation, parse_page, MutationResult, Page};

// ========================
// Transport Seam
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Methods that must carry the anti-forgery token
    pub fn is_state_changing(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Fully prepared outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body text, before classification
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a request and returns whatever the server answered.
///
/// Only failures to get an answer at all are errors here
/// ([`RequestError::Network`]); HTTP error statuses are not.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, RequestError>;
}

/// Where the anti-forgery token comes from
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

// ========================
// Gateway
// ========================

#[derive(Clone)]
pub struct HttpGateway {
    transport: Rc<dyn Transport>,
    tokens: Rc<dyn TokenSource>,
    csrf_header: String,
}

impl HttpGateway {
    pub fn new(transport: Rc<dyn Transport>, tokens: Rc<dyn TokenSource>, csrf_header: impl Into<String>) -> Self {
        Self {
            transport,
            tokens,
            csrf_header: csrf_header.into(),
        }
    }

    pub async fn get(&self, url: &str) -> Result<Value, RequestError> {
        self.request(Method::Get, url, None).await
    }

    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value, RequestError> {
        self.request(Method::Post, url, body).await
    }

    /// Send one request and classify the answer. No retries.
    pub async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value, RequestError> {
        let mut headers = vec![
            ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];

        if method.is_state_changing() {
            let Some(token) = self.tokens.token() else {
                log::error!("[GATEWAY] {} {} aborted: no anti-forgery token", method, url);
                return Err(RequestError::MissingToken);
            };
            headers.push((self.csrf_header.clone(), token));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body: body.map(Value::to_string),
        };

        log::debug!("[GATEWAY] {} {}", method, url);
        let raw = self.transport.send(request).await.inspect_err(|e| {
            log::error!("[GATEWAY] {} {} failed: {}", method, url, e);
        })?;

        classify(raw.status, &raw.body).inspect_err(|e| {
            log::warn!("[GATEWAY] {} {} -> {}: {}", method, url, raw.status, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{gateway, gateway_without_token, ScriptedTransport};
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn get_sends_standard_headers_without_token() {
        let transport = Rc::new(ScriptedTransport::default());
        transport.reply(200, json!([]));
        let gw = gateway(&transport);

        block_on(gw.get("/reviews/get-reviews/")).unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].header("X-Requested-With"), Some("XMLHttpRequest"));
        assert_eq!(sent[0].header("X-CSRFToken"), None);
        assert_eq!(sent[0].body, None);
    }

    #[test]
    fn post_attaches_token_and_json_body() {
        let transport = Rc::new(ScriptedTransport::default());
        transport.reply(201, json!({"status": "success"}));
        let gw = gateway(&transport);

        let body = json!({"rating": 4});
        block_on(gw.post("/reviews/add-review/", Some(&body))).unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.header("x-csrftoken"), Some("test-token"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(r#"{"rating":4}"#));
    }

    #[test]
    fn missing_token_fails_before_sending() {
        let transport = Rc::new(ScriptedTransport::default());
        let gw = gateway_without_token(&transport);

        let result = block_on(gw.post("/reviews/delete-review/3/", None));

        assert_eq!(result, Err(RequestError::MissingToken));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn network_failure_is_surfaced_once() {
        let transport = Rc::new(ScriptedTransport::default());
        transport.fail_network();
        let gw = gateway(&transport);

        let result = block_on(gw.get("/dashboard/"));

        assert!(matches!(result, Err(RequestError::Network(_))));
        assert_eq!(transport.request_count(), 1);
    }
}
