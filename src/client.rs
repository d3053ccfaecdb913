use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings used by [`Client::new`] to build its HTTP client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scheme and host every path is appended to. Bearer tokens are only
    /// honoured by `https://oauth.reddit.com`.
    pub base_url: String,
    pub user_agent: String,
    pub access_token: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            access_token: None,
            timeout: None,
        }
    }
}

/// Entry point for every API call.
///
/// Holds no mutable state; clones share the underlying connection pool and
/// can be used from concurrent tasks.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http(
            builder.build()?,
            config.base_url,
            config.access_token,
        ))
    }

    /// Wraps an already configured `reqwest::Client` without touching it.
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            access_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Deletes any thing by fullname. Requires the `edit` scope.
    pub async fn delete_thing(&self, fullname: &str) -> Result<()> {
        let url = self.endpoint("/api/del");
        debug!(%url, fullname, "deleting thing");
        let response = self
            .authorize(self.http.post(&url))
            .form(&[("id", fullname)])
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "sending GET");
        let response = self.authorize(self.http.get(url)).send().await?;
        let body = check_status(response)?.text().await?;
        serde_json::from_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    warn!(%url, %status, "request rejected");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Authorization { status, url }),
        _ => Err(Error::HttpStatus { status, url }),
    }
}
