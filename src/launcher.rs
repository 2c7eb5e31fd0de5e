//! MCP client configuration
//!
//! Builds the `mcpServers` entry an MCP client (desktop chat app, IDE agent)
//! uses to launch this server, and merges it into an existing client config
//! file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result, ZiaMcpError};

/// How a client starts one MCP server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    /// Executable to run
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment for the server process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

impl LaunchDescriptor {
    /// Descriptor that runs `executable`, pointing it at `env_file` when given
    pub fn for_executable(executable: &Path, env_file: Option<&Path>) -> Self {
        let args = match env_file {
            Some(path) => vec!["--env-file".to_string(), path.display().to_string()],
            None => Vec::new(),
        };

        Self {
            command: executable.display().to_string(),
            args,
            env: None,
        }
    }
}

/// Client configuration file holding an `mcpServers` map
///
/// Entries are kept as raw JSON: other servers may be URL/SSE entries or carry
/// client-specific keys (`disabled`, `cwd`, `type`). Keys other than
/// `mcpServers` are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpClientConfig {
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: serde_json::Map<String, Value>,

    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

impl McpClientConfig {
    /// Config with a single server entry
    pub fn single(name: &str, descriptor: &LaunchDescriptor) -> Result<Self> {
        let mut config = Self::default();
        config
            .mcp_servers
            .insert(name.to_string(), serde_json::to_value(descriptor)?);
        Ok(config)
    }

    /// Launch descriptor for `name`, if it is a command entry
    pub fn descriptor(&self, name: &str) -> Option<LaunchDescriptor> {
        self.mcp_servers
            .get(name)
            .and_then(|entry| serde_json::from_value(entry.clone()).ok())
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a client config file; a missing file gives an empty config
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            ZiaMcpError::Config(ConfigError::InvalidClientConfig {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Insert or replace `name` in the config file at `path`
    ///
    /// The file is only written once the existing content has parsed.
    pub fn merge_into_file(path: &Path, name: &str, descriptor: &LaunchDescriptor) -> Result<Self> {
        let mut config = Self::load(path)?;
        if config
            .mcp_servers
            .insert(name.to_string(), serde_json::to_value(descriptor)?)
            .is_some()
        {
            tracing::info!("Replacing existing '{}' entry in {}", name, path.display());
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = config.to_json()?;
        content.push('\n');
        std::fs::write(path, content)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_descriptor_shape() {
        let descriptor = LaunchDescriptor::for_executable(
            &PathBuf::from("/usr/local/bin/zscaler-mcp-server"),
            Some(&PathBuf::from("/home/me/.zscaler-mcp/.env")),
        );
        let config = McpClientConfig::single("zscaler-mcp-server", &descriptor).unwrap();
        let value: Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        let entry = &value["mcpServers"]["zscaler-mcp-server"];
        assert_eq!(entry["command"], "/usr/local/bin/zscaler-mcp-server");
        assert_eq!(entry["args"][0], "--env-file");
        assert_eq!(entry["args"][1], "/home/me/.zscaler-mcp/.env");
        assert!(entry.get("env").is_none());
    }

    #[test]
    fn test_merge_keeps_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claude_desktop_config.json");
        std::fs::write(
            &path,
            r#"{"theme":"dark","mcpServers":{"other":{"command":"uvx","args":["other-mcp"]}}}"#,
        )
        .unwrap();

        let descriptor = LaunchDescriptor::for_executable(&PathBuf::from("zscaler-mcp-server"), None);
        McpClientConfig::merge_into_file(&path, "zscaler", &descriptor).unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["mcpServers"]["other"]["args"][0], "other-mcp");
        assert_eq!(value["mcpServers"]["zscaler"]["command"], "zscaler-mcp-server");
    }

    #[test]
    fn test_merge_keeps_url_entries_and_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp.json");
        std::fs::write(
            &path,
            r#"{"mcpServers":{"remote":{"type":"sse","url":"https://x/sse"},"local":{"command":"uvx","args":["a"],"disabled":true,"cwd":"/w"}}}"#,
        )
        .unwrap();

        let descriptor = LaunchDescriptor::for_executable(&PathBuf::from("zscaler-mcp-server"), None);
        let config = McpClientConfig::merge_into_file(&path, "zscaler", &descriptor).unwrap();
        assert_eq!(config.descriptor("zscaler"), Some(descriptor));
        assert_eq!(config.descriptor("remote"), None);

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let servers = &value["mcpServers"];
        assert_eq!(servers["remote"]["type"], "sse");
        assert_eq!(servers["remote"]["url"], "https://x/sse");
        assert_eq!(servers["local"]["command"], "uvx");
        assert_eq!(servers["local"]["args"][0], "a");
        assert_eq!(servers["local"]["disabled"], true);
        assert_eq!(servers["local"]["cwd"], "/w");
        assert_eq!(servers["zscaler"]["command"], "zscaler-mcp-server");
    }

    #[test]
    fn test_merge_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mcp.json");

        let descriptor = LaunchDescriptor::for_executable(&PathBuf::from("zscaler-mcp-server"), None);
        let config = McpClientConfig::merge_into_file(&path, "zscaler", &descriptor).unwrap();

        assert_eq!(config.mcp_servers.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_json_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp.json");
        std::fs::write(&path, "{ broken").unwrap();

        let descriptor = LaunchDescriptor::for_executable(&PathBuf::from("zscaler-mcp-server"), None);
        let err = McpClientConfig::merge_into_file(&path, "zscaler", &descriptor).unwrap_err();

        assert!(matches!(
            err,
            ZiaMcpError::Config(ConfigError::InvalidClientConfig { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }
}
