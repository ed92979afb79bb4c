//! The I/O seam between the category client and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and returns the `HttpResponse`
//! as data, whatever its status. Only a failure to obtain a response is an
//! `Err`. The trait is object-safe so a client can hold an injected
//! `Arc<dyn Transport>` and tests can substitute a scripted one.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url,
            bearer_token: config.bearer_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = %request.method, %url, "sending request");
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(key, value)| Some((key.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        tracing::debug!(status, %url, "received response");
        Ok(HttpResponse { status, headers, body })
    }
}
