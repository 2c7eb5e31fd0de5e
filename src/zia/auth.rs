//! Authentication for the ZIA API
//!
//! Two modes are supported:
//! - OneAPI: OAuth 2.0 client credentials exchanged for a bearer token
//! - Legacy: obfuscated API key login yielding a `JSESSIONID` session cookie
//!
//! Tokens and sessions are cached and refreshed on demand.

use std::fmt;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::{self, Config};
use crate::error::{AuthError, Result, ZiaMcpError};

/// Refresh a token when it has less than this left
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Legacy sessions are reused for this long
const SESSION_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Which ZIA API a request goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    OneApi,
    Legacy,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::OneApi => write!(f, "OneAPI"),
            AuthMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// Token response from the OneAPI token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Legacy login request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRequest<'a> {
    api_key: String,
    username: &'a str,
    password: &'a str,
    timestamp: String,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

struct LegacySession {
    cookie: String,
    created_at: Instant,
}

/// ZIA authenticator
pub struct Authenticator {
    /// Configuration
    config: Config,

    /// HTTP client used for token and session requests
    http_client: reqwest::Client,

    /// Cached OneAPI token
    token: RwLock<Option<CachedToken>>,

    /// Cached legacy session
    session: RwLock<Option<LegacySession>>,
}

impl Authenticator {
    /// Create a new authenticator
    pub fn new(config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            http_client,
            token: RwLock::new(None),
            session: RwLock::new(None),
        })
    }

    /// Configuration this authenticator was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pick the auth mode for a call, falling back to the configured default
    pub fn resolve_mode(&self, use_legacy: Option<bool>) -> AuthMode {
        if use_legacy.unwrap_or(self.config.use_legacy) {
            AuthMode::Legacy
        } else {
            AuthMode::OneApi
        }
    }

    /// Base URL of the API behind the given mode
    pub fn base_url(&self, mode: AuthMode) -> Result<&str> {
        match mode {
            AuthMode::OneApi => Ok(self.config.api_base_url.as_str()),
            AuthMode::Legacy => self
                .config
                .legacy_base_url
                .as_deref()
                .ok_or_else(|| missing_credentials(AuthMode::Legacy)),
        }
    }

    /// Attach credentials for the given mode to a request
    pub async fn authorize(
        &self,
        mode: AuthMode,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        match mode {
            AuthMode::OneApi => {
                let token = self.access_token().await?;
                Ok(request.bearer_auth(token))
            }
            AuthMode::Legacy => {
                let cookie = self.session_cookie().await?;
                Ok(request.header(
                    reqwest::header::COOKIE,
                    format!("{}={}", config::zia::SESSION_COOKIE, cookie),
                ))
            }
        }
    }

    /// Drop cached credentials so the next request logs in again
    pub async fn invalidate(&self, mode: AuthMode) {
        match mode {
            AuthMode::OneApi => *self.token.write().await = None,
            AuthMode::Legacy => *self.session.write().await = None,
        }
    }

    /// Get a valid OneAPI access token, requesting a new one if necessary
    pub async fn access_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if let Some(ref cached) = *token {
                if cached.expires_at.saturating_duration_since(Instant::now()) > TOKEN_REFRESH_MARGIN {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let mut token = self.token.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(ref cached) = *token {
            if cached.expires_at.saturating_duration_since(Instant::now()) > TOKEN_REFRESH_MARGIN {
                return Ok(cached.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *token = Some(fresh);

        Ok(access_token)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let creds = self
            .config
            .oneapi
            .as_ref()
            .ok_or_else(|| missing_credentials(AuthMode::OneApi))?;
        let token_url = self
            .config
            .token_url
            .as_deref()
            .ok_or_else(|| missing_credentials(AuthMode::OneApi))?;

        tracing::debug!("Requesting OneAPI token from {}", token_url);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("audience", config::zia::ONEAPI_AUDIENCE),
        ];

        let response = self
            .http_client
            .post(token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ZiaMcpError::Auth(AuthError::TokenRequestFailed {
                message: format!("{}: {}", status, text),
            }));
        }

        let token_response: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token_response.expires_in.unwrap_or(3600));

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    /// Get a valid legacy session cookie value, logging in if necessary
    pub async fn session_cookie(&self) -> Result<String> {
        {
            let session = self.session.read().await;
            if let Some(ref s) = *session {
                if s.created_at.elapsed() < SESSION_LIFETIME {
                    return Ok(s.cookie.clone());
                }
            }
        }

        let mut session = self.session.write().await;
        if let Some(ref s) = *session {
            if s.created_at.elapsed() < SESSION_LIFETIME {
                return Ok(s.cookie.clone());
            }
        }

        let cookie = self.login_legacy().await?;
        *session = Some(LegacySession {
            cookie: cookie.clone(),
            created_at: Instant::now(),
        });

        Ok(cookie)
    }

    async fn login_legacy(&self) -> Result<String> {
        let creds = self
            .config
            .legacy
            .as_ref()
            .ok_or_else(|| missing_credentials(AuthMode::Legacy))?;
        let base_url = self.base_url(AuthMode::Legacy)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let body = SessionRequest {
            api_key: obfuscate_api_key(&creds.api_key, timestamp)?,
            username: &creds.username,
            password: &creds.password,
            timestamp: timestamp.to_string(),
        };

        let url = format!("{}/authenticatedSession", base_url);
        tracing::debug!("Opening legacy ZIA session at {}", url);

        let response = self.http_client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ZiaMcpError::Auth(AuthError::SessionLoginFailed {
                message: format!("{}: {}", status, text),
            }));
        }

        response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_cookie_value)
            .ok_or_else(|| ZiaMcpError::Auth(AuthError::MissingSessionCookie))
    }
}

fn missing_credentials(mode: AuthMode) -> ZiaMcpError {
    use crate::config::env;

    let vars = match mode {
        AuthMode::OneApi => [env::CLIENT_ID, env::CLIENT_SECRET, env::VANITY_DOMAIN].join(", "),
        AuthMode::Legacy => [
            env::ZIA_USERNAME,
            env::ZIA_PASSWORD,
            env::ZIA_API_KEY,
            env::ZIA_CLOUD,
        ]
        .join(", "),
    };

    ZiaMcpError::Auth(AuthError::MissingCredentials {
        mode: mode.to_string(),
        vars,
    })
}

/// Extract the JSESSIONID value from a `Set-Cookie` header
fn session_cookie_value(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    (name == config::zia::SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
}

/// Obfuscate a legacy API key with the login timestamp (milliseconds)
pub fn obfuscate_api_key(api_key: &str, timestamp_ms: u128) -> Result<String> {
    if !api_key.is_ascii() || api_key.len() < 12 {
        return Err(ZiaMcpError::Auth(AuthError::InvalidApiKey {
            message: "expected at least 12 ASCII characters".to_string(),
        }));
    }

    let ts = timestamp_ms.to_string();
    let n = &ts[ts.len().saturating_sub(6)..];
    let n_value: u32 = n.parse().unwrap_or_default();
    let r = format!("{:06}", n_value >> 1);

    let key = api_key.as_bytes();
    let mut obfuscated = String::with_capacity(12);
    for digit in n.bytes() {
        obfuscated.push(key[(digit - b'0') as usize] as char);
    }
    for digit in r.bytes() {
        obfuscated.push(key[(digit - b'0') as usize + 2] as char);
    }

    Ok(obfuscated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with(vars: &[(&str, String)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_obfuscate_api_key() {
        // n = "123456", r = 61728 -> "061728"
        let key = obfuscate_api_key("abcdefghijkl", 1_700_000_123_456).unwrap();
        assert_eq!(key, "bcdefgcidjek");
        assert_eq!(key.len(), 12);
    }

    #[test]
    fn test_obfuscate_rejects_short_key() {
        assert!(obfuscate_api_key("short", 1_700_000_123_456).is_err());
    }

    #[test]
    fn test_session_cookie_value() {
        assert_eq!(
            session_cookie_value("JSESSIONID=ABC123; Path=/; Secure; HttpOnly"),
            Some("ABC123".to_string())
        );
        assert_eq!(session_cookie_value("other=1; Path=/"), None);
        assert_eq!(session_cookie_value("JSESSIONID=; Path=/"), None);
    }

    #[test]
    fn test_resolve_mode() {
        let auth = Authenticator::new(config_with(&[])).unwrap();
        assert_eq!(auth.resolve_mode(None), AuthMode::OneApi);
        assert_eq!(auth.resolve_mode(Some(true)), AuthMode::Legacy);

        let auth = Authenticator::new(config_with(&[(
            crate::config::env::USE_LEGACY,
            "true".to_string(),
        )]))
        .unwrap();
        assert_eq!(auth.resolve_mode(None), AuthMode::Legacy);
        assert_eq!(auth.resolve_mode(Some(false)), AuthMode::OneApi);
    }

    #[tokio::test]
    async fn test_missing_oneapi_credentials() {
        let auth = Authenticator::new(config_with(&[])).unwrap();
        let err = auth.access_token().await.unwrap_err();
        assert!(err.to_string().contains("ZSCALER_CLIENT_ID"));
    }

    #[tokio::test]
    async fn test_access_token_is_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/v1/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-1",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = Authenticator::new(config_with(&[
            (crate::config::env::CLIENT_ID, "id".to_string()),
            (crate::config::env::CLIENT_SECRET, "secret".to_string()),
            (crate::config::env::VANITY_DOMAIN, "acme".to_string()),
            (
                crate::config::env::TOKEN_URL,
                format!("{}/oauth2/v1/token", server.uri()),
            ),
        ]))
        .unwrap();

        assert_eq!(auth.access_token().await.unwrap(), "tok-1");
        assert_eq!(auth.access_token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_token_request_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/v1/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let auth = Authenticator::new(config_with(&[
            (crate::config::env::CLIENT_ID, "id".to_string()),
            (crate::config::env::CLIENT_SECRET, "bad".to_string()),
            (crate::config::env::VANITY_DOMAIN, "acme".to_string()),
            (
                crate::config::env::TOKEN_URL,
                format!("{}/oauth2/v1/token", server.uri()),
            ),
        ]))
        .unwrap();

        let err = auth.access_token().await.unwrap_err();
        assert!(matches!(
            err,
            ZiaMcpError::Auth(AuthError::TokenRequestFailed { .. })
        ));
        assert!(err.to_string().contains("invalid_client"));
    }

    #[tokio::test]
    async fn test_legacy_session_login() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/authenticatedSession"))
            .and(body_string_contains("\"username\":\"admin@acme.com\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "JSESSIONID=SESSION42; Path=/; HttpOnly")
                    .set_body_json(serde_json::json!({"authType": "ADMIN_LOGIN"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let auth = Authenticator::new(config_with(&[
            (crate::config::env::ZIA_USERNAME, "admin@acme.com".to_string()),
            (crate::config::env::ZIA_PASSWORD, "pw".to_string()),
            (crate::config::env::ZIA_API_KEY, "abcdefghijkl".to_string()),
            (crate::config::env::ZIA_CLOUD, "zscalertwo".to_string()),
            (
                crate::config::env::LEGACY_BASE_URL,
                format!("{}/api/v1", server.uri()),
            ),
        ]))
        .unwrap();

        assert_eq!(auth.session_cookie().await.unwrap(), "SESSION42");
        assert_eq!(auth.session_cookie().await.unwrap(), "SESSION42");
    }
}
