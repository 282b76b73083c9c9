//! Browser transport over `fetch`.

use async_trait::async_trait;
use gloo_net::http::Request;

use super::{HttpRequest, Method, RawResponse, RequestError, Transport};

/// Sends requests with the browser's `fetch` (same-origin credentials)
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, RequestError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            Some(body) => builder.body(body).map_err(network)?.send().await,
            None => builder.send().await,
        }
        .map_err(network)?;

        let status = response.status();
        let body = response.text().await.map_err(network)?;
        Ok(RawResponse { status, body })
    }
}

fn network(err: gloo_net::Error) -> RequestError {
    RequestError::Network(err.to_string())
}
