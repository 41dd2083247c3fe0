//! Executes `HttpRequest`s produced by the core over real HTTP.
//!
//! ureq is blocking, so async callers go through tokio's blocking pool and
//! the event loop keeps running while requests are outstanding.

use std::fmt;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport").finish_non_exhaustive()
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    /// Non-2xx statuses are returned as data so the core can interpret them.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Execute `req`, blocking the current thread.
    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = req;
        debug!(%method, %path, "sending");

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&path), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&path), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&path), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&path), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&path), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&path), &headers).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(%method, %path, status, "received");
        Ok(HttpResponse::new(status, body))
    }

    /// Execute `req` on the blocking pool.
    pub async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let transport = self.clone();
        tokio::task::spawn_blocking(move || transport.execute(req))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_the_type() {
        assert_eq!(format!("{:?}", Transport::new()), "Transport { .. }");
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: format!("http://{addr}/todos"),
            headers: Vec::new(),
            body: None,
        };
        assert!(matches!(Transport::new().execute(req), Err(ApiError::Transport(_))));
    }
}
