//! Configuration management for the Zscaler MCP Server
//!
//! Handles paths, environment variables, env files, and endpoint resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result, ZiaMcpError};

/// OneAPI (OAuth2 client credentials) settings
#[derive(Debug, Clone)]
pub struct OneApiCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub vanity_domain: String,
    /// Non-production cloud name (e.g. "beta"), if any
    pub cloud: Option<String>,
}

/// Legacy ZIA API (session cookie) settings
#[derive(Debug, Clone)]
pub struct LegacyCredentials {
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub cloud: String,
}

/// Configuration for the Zscaler MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the default env file
    pub config_dir: PathBuf,

    /// Env file that was loaded, if any
    pub env_file: Option<PathBuf>,

    /// OneAPI credentials, when fully configured
    pub oneapi: Option<OneApiCredentials>,

    /// Legacy credentials, when fully configured
    pub legacy: Option<LegacyCredentials>,

    /// Use the legacy API when a tool call does not say otherwise
    pub use_legacy: bool,

    /// OneAPI token endpoint
    pub token_url: Option<String>,

    /// OneAPI ZIA base URL
    pub api_base_url: String,

    /// Legacy ZIA base URL
    pub legacy_base_url: Option<String>,

    /// Whether write tools are exposed at all
    pub write_enabled: bool,

    /// Allowlist of write tool name patterns (`*` wildcard); empty means all
    pub write_tools: Vec<String>,

    /// Skip the confirmation round-trip for destructive tools
    pub skip_confirmations: bool,

    /// HTTP request timeout
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration from the process environment, loading an env file first.
    ///
    /// When `env_file` is `None`, `~/.zscaler-mcp/.env` is used if it exists.
    /// Variables already present in the process environment take precedence.
    pub fn new(env_file: Option<&Path>) -> Result<Self> {
        let config_dir = Self::get_config_dir()?;

        let env_file = match env_file {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = config_dir.join(".env");
                default.exists().then_some(default)
            }
        };

        let file_vars: HashMap<String, String> = match &env_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                parse_env_file(&content, path)?.into_iter().collect()
            }
            None => HashMap::new(),
        };

        let mut config = Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })?;
        config.config_dir = config_dir;
        config.env_file = env_file;

        Ok(config)
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let oneapi = match (
            var(env::CLIENT_ID),
            var(env::CLIENT_SECRET),
            var(env::VANITY_DOMAIN),
        ) {
            (Some(client_id), Some(client_secret), Some(vanity_domain)) => Some(OneApiCredentials {
                client_id,
                client_secret,
                vanity_domain,
                cloud: var(env::CLOUD).filter(|c| !c.eq_ignore_ascii_case("production")),
            }),
            _ => None,
        };

        let legacy = match (
            var(env::ZIA_USERNAME),
            var(env::ZIA_PASSWORD),
            var(env::ZIA_API_KEY),
            var(env::ZIA_CLOUD),
        ) {
            (Some(username), Some(password), Some(api_key), Some(cloud)) => {
                Some(LegacyCredentials {
                    username,
                    password,
                    api_key,
                    cloud,
                })
            }
            _ => None,
        };

        let token_url = var(env::TOKEN_URL).or_else(|| {
            oneapi.as_ref().map(|c| match &c.cloud {
                Some(cloud) => format!(
                    "https://{}.zslogin{}.net/oauth2/v1/token",
                    c.vanity_domain, cloud
                ),
                None => format!("https://{}.zslogin.net/oauth2/v1/token", c.vanity_domain),
            })
        });

        let api_base_url = var(env::API_BASE_URL).unwrap_or_else(|| {
            match oneapi.as_ref().and_then(|c| c.cloud.as_ref()) {
                Some(cloud) => format!("https://api.{}.zsapi.net/zia/api/v1", cloud),
                None => zia::ONEAPI_BASE_URL.to_string(),
            }
        });

        let legacy_base_url = var(env::LEGACY_BASE_URL).or_else(|| {
            legacy
                .as_ref()
                .map(|c| format!("https://zsapi.{}.net/api/v1", c.cloud))
        });

        let write_tools = var(env::WRITE_TOOLS)
            .map(|list| split_list(&list))
            .unwrap_or_default();

        let timeout_secs = match var(env::TIMEOUT_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                ZiaMcpError::Config(ConfigError::InvalidValue {
                    var: env::TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                })
            })?,
            None => 60,
        };

        Ok(Self {
            config_dir: PathBuf::from(".zscaler-mcp"),
            env_file: None,
            oneapi,
            legacy,
            use_legacy: parse_bool(env::USE_LEGACY, var(env::USE_LEGACY))?,
            token_url,
            api_base_url,
            legacy_base_url,
            write_enabled: parse_bool(env::WRITE_ENABLED, var(env::WRITE_ENABLED))?,
            write_tools,
            skip_confirmations: parse_bool(
                env::SKIP_CONFIRMATIONS,
                var(env::SKIP_CONFIRMATIONS),
            )?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Get the configuration directory (not created here)
    fn get_config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            ZiaMcpError::Config(ConfigError::DirNotFound {
                path: "~".to_string(),
            })
        })?;

        Ok(home.join(".zscaler-mcp"))
    }

    /// Check if OneAPI credentials are configured
    pub fn has_oneapi(&self) -> bool {
        self.oneapi.is_some()
    }

    /// Check if legacy credentials are configured
    pub fn has_legacy(&self) -> bool {
        self.legacy.is_some()
    }
}

/// Parse a boolean flag value
fn parse_bool(var: &str, value: Option<String>) -> Result<bool> {
    match value {
        None => Ok(false),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ZiaMcpError::Config(ConfigError::InvalidValue {
                var: var.to_string(),
                value: v,
            })),
        },
    }
}

/// Split a comma-separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Parse `KEY=VALUE` lines of an env file
pub fn parse_env_file(content: &str, path: &Path) -> Result<Vec<(String, String)>> {
    let mut vars = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

        let (key, value) = line.split_once('=').ok_or_else(|| {
            ZiaMcpError::Config(ConfigError::EnvFile {
                path: path.display().to_string(),
                line: idx + 1,
                message: "expected KEY=VALUE".to_string(),
            })
        })?;

        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(ZiaMcpError::Config(ConfigError::EnvFile {
                path: path.display().to_string(),
                line: idx + 1,
                message: format!("invalid variable name '{}'", key),
            }));
        }

        vars.push((key.to_string(), unquote(value.trim()).to_string()));
    }

    Ok(vars)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Environment variable names
pub mod env {
    pub const CLIENT_ID: &str = "ZSCALER_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "ZSCALER_CLIENT_SECRET";
    pub const VANITY_DOMAIN: &str = "ZSCALER_VANITY_DOMAIN";
    pub const CLOUD: &str = "ZSCALER_CLOUD";

    pub const ZIA_USERNAME: &str = "ZIA_USERNAME";
    pub const ZIA_PASSWORD: &str = "ZIA_PASSWORD";
    pub const ZIA_API_KEY: &str = "ZIA_API_KEY";
    pub const ZIA_CLOUD: &str = "ZIA_CLOUD";

    pub const USE_LEGACY: &str = "ZSCALER_USE_LEGACY";
    pub const WRITE_ENABLED: &str = "ZSCALER_MCP_WRITE_ENABLED";
    pub const WRITE_TOOLS: &str = "ZSCALER_MCP_WRITE_TOOLS";
    pub const SKIP_CONFIRMATIONS: &str = "ZSCALER_MCP_SKIP_CONFIRMATIONS";
    pub const TIMEOUT_SECS: &str = "ZSCALER_MCP_TIMEOUT_SECS";

    pub const TOKEN_URL: &str = "ZSCALER_TOKEN_URL";
    pub const API_BASE_URL: &str = "ZIA_API_BASE_URL";
    pub const LEGACY_BASE_URL: &str = "ZIA_LEGACY_BASE_URL";
}

/// ZIA API constants
pub mod zia {
    /// Production OneAPI base URL for ZIA
    pub const ONEAPI_BASE_URL: &str = "https://api.zsapi.net/zia/api/v1";

    /// OAuth audience for OneAPI tokens
    pub const ONEAPI_AUDIENCE: &str = "https://api.zscaler.com";

    /// Name of the legacy session cookie
    pub const SESSION_COOKIE: &str = "JSESSIONID";
}
