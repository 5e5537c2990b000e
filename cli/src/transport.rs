//! Blocking HTTP execution for the core's request values.

use task_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::debug;

/// Executes `HttpRequest`s with a shared ureq agent.
///
/// HTTP status is never treated as an error here; 4xx/5xx come back as
/// data so the core decides what they mean.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
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
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = req.method.as_str(), path = %req.path, "sending request");

        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), req).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), req).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&req.path), req), req),
            HttpMethod::Put => send(with_headers(self.agent.put(&req.path), req), req),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, "response received");
        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, req: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    req: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &req.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
