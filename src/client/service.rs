//! Outbound HTTP collaborator for the service clients.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK};
use reqwest::{Client, Method};
use tracing::{debug, instrument};

use super::error::{ClientError, ClientResult};
use crate::url::parse_next_link;

#[cfg(test)]
use mockall::automock;

/// A tool's registration with a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Platform issuer identifier
    pub issuer: String,
    /// OAuth2 client id assigned to the tool
    pub client_id: String,
}

impl Registration {
    pub fn new(issuer: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            client_id: client_id.into(),
        }
    }
}

/// One call against an AGS endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: Method,
    pub url: String,
    pub content_type: Option<&'static str>,
    pub accept: Option<&'static str>,
    pub body: Option<String>,
    /// Scopes the access token must carry
    pub scopes: Vec<String>,
}

impl ServiceRequest {
    pub fn new(method: Method, url: impl Into<String>, scope: &str) -> Self {
        Self {
            method,
            url: url.into(),
            content_type: None,
            accept: None,
            body: None,
            scopes: vec![scope.to_string()],
        }
    }

    pub fn with_body(mut self, content_type: &'static str, body: String) -> Self {
        self.content_type = Some(content_type);
        self.body = Some(body);
        self
    }

    pub fn with_accept(mut self, media_type: &'static str) -> Self {
        self.accept = Some(media_type);
        self
    }
}

/// A successful response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    /// Target of a `rel="next"` link header
    pub link: Option<String>,
    pub body: String,
}

/// Sends authorized requests on behalf of a registration.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Non-2xx answers are reported as [`ClientError::Service`].
    async fn request(
        &self,
        registration: &Registration,
        request: ServiceRequest,
    ) -> ClientResult<ServiceResponse>;
}

/// Supplies bearer tokens for a registration and a set of scopes.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(
        &self,
        registration: &Registration,
        scopes: &[String],
    ) -> ClientResult<String>;
}

/// Hands out one preconfigured token.
#[derive(Debug, Clone)]
pub struct StaticAccessTokenProvider {
    token: String,
}

impl StaticAccessTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessTokenProvider {
    async fn access_token(&self, _: &Registration, _: &[String]) -> ClientResult<String> {
        if self.token.is_empty() {
            return Err(ClientError::AccessToken {
                message: "no access token configured".to_string(),
            });
        }
        Ok(self.token.clone())
    }
}

/// [`ServiceClient`] over reqwest.
pub struct HttpServiceClient<P: AccessTokenProvider> {
    client: Client,
    tokens: P,
}

impl<P: AccessTokenProvider> HttpServiceClient<P> {
    pub fn new(tokens: P) -> Self {
        Self {
            client: Client::new(),
            tokens,
        }
    }
}

#[async_trait]
impl<P: AccessTokenProvider> ServiceClient for HttpServiceClient<P> {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn request(
        &self,
        registration: &Registration,
        request: ServiceRequest,
    ) -> ClientResult<ServiceResponse> {
        let token = self
            .tokens
            .access_token(registration, &request.scopes)
            .await?;

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        if let Some(accept) = request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_link);
        let body = response.text().await?;
        debug!(status = status.as_u16(), "platform responded");

        if !status.is_success() {
            return Err(ClientError::Service {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(ServiceResponse {
            status: status.as_u16(),
            link,
            body,
        })
    }
}
