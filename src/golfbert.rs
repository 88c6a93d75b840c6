use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::constant::*;
use crate::error::{Error, Result};
use crate::{sign_request, Credentials, SignedRequest};

/// Outcome of a single upstream call.
///
/// The HTTP layer collapses both failure variants into one 500, the
/// distinction is kept here for callers that want it.
#[derive(Debug)]
pub enum ApiResult {
    Success(Value),
    UpstreamError(StatusCode),
    TransportError(Error),
}

impl ApiResult {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[inline]
    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GolfbertClient {
    credentials: Credentials,
    base_url: String,
    http: Client,
}

impl GolfbertClient {
    #[inline]
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn with_timeout(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            credentials,
            base_url: base_url.into(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        match config.timeout {
            Some(timeout) => {
                Self::with_timeout(config.credentials.clone(), &config.base_url, timeout)
            }
            None => Ok(Self::new(config.credentials.clone(), &config.base_url)),
        }
    }

    #[inline]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sign a GET for `endpoint` with the current time.
    #[inline]
    pub fn sign_get(&self, endpoint: &str) -> Result<SignedRequest> {
        sign_request(&self.credentials, "GET", &self.url(endpoint), None, "")
    }

    /// Issue one signed GET and classify the outcome. Never retries.
    pub async fn fetch(&self, endpoint: &str) -> ApiResult {
        match self.execute(endpoint).await {
            Ok(result) => result,
            Err(e) => {
                warn!("API request failed: {}", e);
                ApiResult::TransportError(e)
            }
        }
    }

    async fn execute(&self, endpoint: &str) -> Result<ApiResult> {
        let url = self.url(endpoint);
        let signed = self.sign_get(endpoint)?;

        let mut req = self.http.get(&url);
        for (name, value) in &signed.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let res = req.send().await?;
        let status = res.status();
        info!("Request to {} returned status: {}", url, status.as_u16());

        if status == StatusCode::OK {
            let body = res.json::<Value>().await?;
            Ok(ApiResult::Success(body))
        } else {
            let text = res.text().await.unwrap_or_default();
            warn!("Response content: {}", text);
            Ok(ApiResult::UpstreamError(status))
        }
    }

    #[inline]
    pub async fn course_holes(&self, course_id: i64) -> ApiResult {
        self.fetch(&format!("/courses/{}/holes", course_id)).await
    }

    #[inline]
    pub async fn hole_polygons(&self, hole_id: i64) -> ApiResult {
        self.fetch(&format!("/holes/{}/polygons", hole_id)).await
    }

    #[inline]
    pub async fn probe(&self) -> ApiResult {
        self.fetch(PROBE_ENDPOINT).await
    }
}

impl Default for GolfbertClient {
    fn default() -> Self {
        Self::new(Credentials::default(), API_BASE_URL)
    }
}
