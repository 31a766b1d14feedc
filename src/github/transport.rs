use crate::config::Settings;
use anyhow::Context;
use serde::Serialize;
use thiserror::Error;

mod headers {
    pub const ACCEPT: &str = "application/vnd.github+json";
    pub const API_VERSION_NAME: &str = "X-GitHub-Api-Version";
    pub const API_VERSION: &str = "2022-11-28";
    pub const USER_AGENT: &str = "starguard";
}

/// Status code and raw body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }
}

/// The request could not be completed at all (DNS, TLS, connection reset, ...).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Authenticated access to the hosting API.
///
/// Paths are relative to the API base (e.g. `/repos/owner/name/stargazers`).
/// Implementations return whatever status the server answered with; deciding
/// whether that status is a success is left to the caller.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, path: &str, query: &[(&str, String)])
    -> Result<HttpResponse, TransportError>;

    async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, TransportError>;

    async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(headers::USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        if settings.token.is_none() {
            tracing::warn!("no GitHub token configured, requests will be unauthenticated");
        }
        Ok(HttpTransport {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", headers::ACCEPT)
            .header(headers::API_VERSION_NAME, headers::API_VERSION);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, TransportError> {
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        tracing::debug!(method, path, status, "github api request");
        Ok(HttpResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError> {
        let builder = self.request(reqwest::Method::GET, path).query(query);
        self.send("GET", path, builder).await
    }

    async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, TransportError> {
        let builder = self.request(reqwest::Method::PATCH, path).json(body);
        self.send("PATCH", path, builder).await
    }

    async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, TransportError> {
        let builder = self.request(reqwest::Method::PUT, path).json(body);
        self.send("PUT", path, builder).await
    }
}
