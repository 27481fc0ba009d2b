use log::debug;
use reqwest::header::HeaderValue;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::urls::ApiUrls;
use crate::auth::Token;
use crate::error::{ArtifactError, Result};

const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Authenticated client for the GitLab REST API.
///
/// Holds the resolved `api/v4/` root and the one token used for the whole run.
pub struct GitLabClient {
    client: Client,
    urls: ApiUrls,
    token: HeaderValue,
}

impl GitLabClient {
    pub fn new(base_url: &str, token: &Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ciartifacts/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ArtifactError::Config(format!("Failed to create HTTP client: {e}")))?;

        let urls = ApiUrls::from_base(base_url)?;

        let mut token = HeaderValue::from_str(token.as_str())
            .map_err(|e| ArtifactError::Config(format!("Invalid token: {e}")))?;
        token.set_sensitive(true);

        Ok(Self {
            client,
            urls,
            token,
        })
    }

    pub fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    /// Helper to build authenticated requests
    pub fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(PRIVATE_TOKEN_HEADER, self.token.clone())
    }

    /// GET `url` and decode the whole body as JSON.
    pub async fn fetch_json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(url).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// GET `url` and hand back the live response so the caller can copy the
    /// body incrementally.
    pub async fn fetch_stream(&self, url: Url) -> Result<Response> {
        self.get(url).await
    }

    async fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {url}");

        let response = self
            .auth_request(self.client.get(url.clone()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ArtifactError::ApiError {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}
