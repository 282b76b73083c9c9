//! Scripted transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use super::{HttpGateway, HttpRequest, RawResponse, RequestError, TokenSource, Transport};

type Outcome = Result<RawResponse, RequestError>;

enum Reply {
    Ready(Outcome),
    Deferred(oneshot::Receiver<Outcome>),
}

/// Answers requests from a queue of scripted replies, in order
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: Value) {
        self.reply_raw(status, &body.to_string());
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        let raw = RawResponse { status, body: body.to_string() };
        self.replies.borrow_mut().push_back(Reply::Ready(Ok(raw)));
    }

    pub fn fail_network(&self) {
        let err = RequestError::Network("connection refused".to_string());
        self.replies.borrow_mut().push_back(Reply::Ready(Err(err)));
    }

    /// Queue a reply the test resolves later through the returned handle
    pub fn defer(&self) -> Deferred {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Deferred(rx));
        Deferred(tx)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, RequestError> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(outcome)) => outcome,
            Some(Reply::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(RequestError::Network("reply dropped".to_string()))),
            None => Err(RequestError::Network("no scripted reply".to_string())),
        }
    }
}

/// Pending reply of a [`ScriptedTransport::defer`] call
pub struct Deferred(oneshot::Sender<Outcome>);

impl Deferred {
    pub fn resolve(self, status: u16, body: Value) {
        let raw = RawResponse { status, body: body.to_string() };
        let _ = self.0.send(Ok(raw));
    }
}

pub struct FixedToken(pub Option<&'static str>);

impl TokenSource for FixedToken {
    fn token(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

pub fn gateway(transport: &Rc<ScriptedTransport>) -> HttpGateway {
    HttpGateway::new(transport.clone(), Rc::new(FixedToken(Some("test-token"))), "X-CSRFToken")
}

pub fn gateway_without_token(transport: &Rc<ScriptedTransport>) -> HttpGateway {
    HttpGateway::new(transport.clone(), Rc::new(FixedToken(None)), "X-CSRFToken")
}
