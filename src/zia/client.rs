//! ZIA API client
//!
//! Low-level request plumbing (auth, retries, error mapping) plus accessors for
//! the per-area managers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, ZiaApiError, ZiaMcpError};
use crate::zia::auth::{AuthMode, Authenticator};
use crate::zia::cloud_app_control::CloudAppControlManager;
use crate::zia::devices::DeviceManager;
use crate::zia::firewall::FirewallManager;
use crate::zia::url_categories::UrlCategoryManager;

/// Maximum number of retries on HTTP 429
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Wait used when a 429 carries no usable retry header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);

/// Longest wait honored from a rate-limit header
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// ZIA API client
pub struct ZiaClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Credential provider for both API modes
    authenticator: Arc<Authenticator>,
}

impl ZiaClient {
    /// Create a new ZIA client
    pub fn new(authenticator: Arc<Authenticator>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(authenticator.config().timeout)
            .user_agent(concat!("zscaler-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            authenticator,
        })
    }

    /// The authenticator behind this client
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Pick the auth mode for a call
    pub fn resolve_mode(&self, use_legacy: Option<bool>) -> AuthMode {
        self.authenticator.resolve_mode(use_legacy)
    }

    // ==================== Managers ====================

    /// Network services, service groups and network applications
    pub fn firewall(&self, mode: AuthMode) -> FirewallManager<'_> {
        FirewallManager::new(self, mode)
    }

    /// URL categories and URL lookup
    pub fn url_categories(&self, mode: AuthMode) -> UrlCategoryManager<'_> {
        UrlCategoryManager::new(self, mode)
    }

    /// Devices and device groups
    pub fn devices(&self, mode: AuthMode) -> DeviceManager<'_> {
        DeviceManager::new(self, mode)
    }

    /// Cloud App Control
    pub fn cloud_app_control(&self, mode: AuthMode) -> CloudAppControlManager<'_> {
        CloudAppControlManager::new(self, mode)
    }

    // ==================== Request Helpers ====================

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(
        &self,
        mode: AuthMode,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.send(mode, Method::GET, path, query, None).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body and decode the response
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        mode: AuthMode,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(mode, Method::POST, path, &[], Some(body)).await?;
        Ok(response.json().await?)
    }

    /// PUT a JSON body and decode the response
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        mode: AuthMode,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(mode, Method::PUT, path, query, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// DELETE a resource
    pub async fn delete(&self, mode: AuthMode, path: &str) -> Result<()> {
        self.send(mode, Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Send a request, retrying on rate limits and once on an expired login
    async fn send(
        &self,
        mode: AuthMode,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.authenticator.base_url(mode)?, path);
        let mut rate_limit_retries = 0;
        let mut reauthenticated = false;

        loop {
            let mut request = self.http_client.request(method.clone(), &url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(ref body) = body {
                request = request.json(body);
            }
            let request = self.authenticator.authorize(mode, request).await?;

            tracing::debug!("{} {} ({})", method, url, mode);
            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait = retry_after(response.headers()).unwrap_or(DEFAULT_RETRY_AFTER);
                if rate_limit_retries < MAX_RATE_LIMIT_RETRIES {
                    rate_limit_retries += 1;
                    tracing::warn!(
                        "Rate limited on {} {}, retry {}/{} in {:?}",
                        method,
                        path,
                        rate_limit_retries,
                        MAX_RATE_LIMIT_RETRIES,
                        wait
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }
                return Err(ZiaMcpError::Zia(ZiaApiError::RateLimited {
                    retry_after_secs: wait.as_secs(),
                }));
            }

            if status == StatusCode::UNAUTHORIZED && !reauthenticated {
                tracing::info!("{} credentials rejected, logging in again", mode);
                self.authenticator.invalidate(mode).await;
                reauthenticated = true;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            return Err(map_status(&method, path, status, text));
        }
    }
}

/// Map a failed response to an API error
fn map_status(method: &Method, path: &str, status: StatusCode, body: String) -> ZiaMcpError {
    let err = match status {
        StatusCode::NOT_FOUND => {
            let (resource, id) = split_resource_path(path);
            ZiaApiError::NotFound { resource, id }
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ZiaApiError::Unauthorized {
            message: format!("{} {} ({}): {}", method, path, status, body),
        },
        _ => ZiaApiError::RequestFailed {
            message: format!("{} {} ({}): {}", method, path, status, body),
        },
    };
    ZiaMcpError::Zia(err)
}

/// "/networkServices/42" -> ("networkServices", "42")
fn split_resource_path(path: &str) -> (String, String) {
    let path = path.split('?').next().unwrap_or(path).trim_matches('/');
    match path.rsplit_once('/') {
        Some((resource, id)) => (resource.to_string(), id.to_string()),
        None => (path.to_string(), String::new()),
    }
}

/// Parse `Retry-After` (seconds) or `X-RateLimit-Reset` (seconds until reset)
fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    ["retry-after", "x-ratelimit-reset"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| value.trim().trim_end_matches('s').parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs).min(MAX_RETRY_AFTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_split_resource_path() {
        assert_eq!(
            split_resource_path("/networkServices/42"),
            ("networkServices".to_string(), "42".to_string())
        );
        assert_eq!(
            split_resource_path("/deviceGroups"),
            ("deviceGroups".to_string(), String::new())
        );
    }

    #[test]
    fn test_retry_after_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);

        headers.insert("x-ratelimit-reset", HeaderValue::from_static("7"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert("retry-after", HeaderValue::from_static("3s"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("3600"));
        assert_eq!(retry_after(&headers), Some(MAX_RETRY_AFTER));
    }

    #[test]
    fn test_map_status() {
        let err = map_status(
            &Method::GET,
            "/networkServices/9",
            StatusCode::NOT_FOUND,
            String::new(),
        );
        assert_eq!(err.to_string(), "ZIA API error: networkServices not found: 9");

        let err = map_status(
            &Method::PUT,
            "/urlCategories/CUSTOM_01",
            StatusCode::BAD_REQUEST,
            "DUPLICATE_ITEM".to_string(),
        );
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("DUPLICATE_ITEM"));
    }
}
