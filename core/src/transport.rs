//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the only seam where I/O happens. Non-2xx statuses come back
//! as ordinary `HttpResponse` values so `ResourceClient::parse_*` stays the
//! single place that interprets them; only failures to obtain a response at
//! all become `Failure::Network`.

use tracing::debug;
use ureq::{Agent, RequestBuilder};

use crate::error::Failure;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP exchange per call.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Failure>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Failure> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// No timeout is configured: a hung connection blocks the calling thread
/// until the peer gives up. Response bodies are read in full with no size
/// cap, so a large collection is never cut off mid-list.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Failure> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => prepare(self.agent.get(&url), &query, &headers).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(&url), &query, &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(&url), &query, &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(&url), &query, &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(&url), &query, &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(&url), &query, &headers).send_empty(),
        };
        let mut response = result.map_err(Failure::network)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(Failure::network)?;

        debug!(%method, %url, status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn prepare<B>(
    mut builder: RequestBuilder<B>,
    query: &[(String, String)],
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (key, value) in query {
        builder = builder.query(key, value);
    }
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
