//! Tool exposure policy
//!
//! Decides which tools are listed and callable (write tools are opt-in and can
//! be narrowed with an allowlist) and handles the confirmation round-trip for
//! destructive tools.

use serde_json::Value;

use crate::config::Config;
use crate::error::McpError;

/// What a tool does to tenant state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Only reads
    Read,
    /// Creates or modifies objects
    Write,
    /// Removes data; needs confirmation
    Destructive,
}

impl ToolKind {
    pub fn is_write(self) -> bool {
        !matches!(self, ToolKind::Read)
    }
}

/// Write and confirmation settings
#[derive(Debug, Clone, Default)]
pub struct ToolPolicy {
    pub write_enabled: bool,
    pub write_tools: Vec<String>,
    pub skip_confirmations: bool,
}

impl ToolPolicy {
    /// Read-only policy
    pub fn read_only() -> Self {
        Self::default()
    }

    /// Policy taken from the server configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            write_enabled: config.write_enabled,
            write_tools: config.write_tools.clone(),
            skip_confirmations: config.skip_confirmations,
        }
    }

    /// Check whether a tool may be listed and called
    pub fn check(&self, name: &str, kind: ToolKind) -> Result<(), McpError> {
        if !kind.is_write() {
            return Ok(());
        }
        if !self.write_enabled {
            return Err(McpError::WriteToolDisabled {
                name: name.to_string(),
            });
        }
        if !self.write_tools.is_empty()
            && !self.write_tools.iter().any(|p| wildcard_match(p, name))
        {
            return Err(McpError::WriteToolNotAllowed {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Whether a call to a destructive tool may proceed
    pub fn is_confirmed(&self, args: &Value) -> bool {
        self.skip_confirmations || confirmed_in_args(args)
    }
}

/// Match `name` against a pattern where `*` matches any run of characters
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == name;
    }

    let (first, last) = (parts[0], parts[parts.len() - 1]);
    if !name.starts_with(first) || name.len() < first.len() + last.len() || !name.ends_with(last) {
        return false;
    }

    let mut rest = &name[first.len()..name.len() - last.len()];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    true
}

/// Look for `confirmed: true` at the top level or inside `kwargs`
///
/// `kwargs` may be an object or a JSON-encoded string of one.
fn confirmed_in_args(args: &Value) -> bool {
    if args.get("confirmed").and_then(Value::as_bool) == Some(true) {
        return true;
    }

    let kwargs = match args.get("kwargs") {
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).ok(),
        Some(other) => Some(other.clone()),
        None => None,
    };

    kwargs
        .and_then(|k| k.get("confirmed").and_then(Value::as_bool))
        .unwrap_or(false)
}

/// Message returned instead of running a destructive tool
pub fn confirmation_request(tool: &str, target: &str) -> String {
    format!(
        "Confirmation required: {tool} will permanently change {target}. This cannot be undone.\n\
         Ask the user to confirm, then call {tool} again with the same arguments plus \
         kwargs='{{\"confirmed\": true}}'."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("zia_create_*", "zia_create_url_category"));
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("zia_*_network_*", "zia_update_network_service"));
        assert!(wildcard_match("*_category", "zia_delete_url_category"));
        assert!(wildcard_match("zia_url_lookup", "zia_url_lookup"));
        assert!(!wildcard_match("zia_create_*", "zia_delete_url_category"));
        assert!(!wildcard_match("zia_delete", "zia_delete_url_category"));
        assert!(!wildcard_match("ab*ba", "aba"));
    }

    #[test]
    fn test_read_tools_always_allowed() {
        let policy = ToolPolicy::read_only();
        assert!(policy.check("zia_list_devices", ToolKind::Read).is_ok());
        assert!(matches!(
            policy.check("zia_create_url_category", ToolKind::Write),
            Err(McpError::WriteToolDisabled { .. })
        ));
    }

    #[test]
    fn test_write_allowlist() {
        let policy = ToolPolicy {
            write_enabled: true,
            write_tools: vec!["zia_create_*".to_string()],
            skip_confirmations: false,
        };
        assert!(policy.check("zia_create_network_service", ToolKind::Write).is_ok());
        assert!(matches!(
            policy.check("zia_delete_network_service", ToolKind::Destructive),
            Err(McpError::WriteToolNotAllowed { .. })
        ));

        let open = ToolPolicy {
            write_enabled: true,
            ..Default::default()
        };
        assert!(open.check("zia_delete_network_service", ToolKind::Destructive).is_ok());
    }

    #[test]
    fn test_confirmation_detection() {
        let policy = ToolPolicy::default();
        assert!(!policy.is_confirmed(&json!({"service_id": "1"})));
        assert!(policy.is_confirmed(&json!({"confirmed": true})));
        assert!(policy.is_confirmed(&json!({"kwargs": "{\"confirmed\": true}"})));
        assert!(policy.is_confirmed(&json!({"kwargs": {"confirmed": true}})));
        assert!(!policy.is_confirmed(&json!({"kwargs": "{\"confirmed\": false}"})));
        assert!(!policy.is_confirmed(&json!({"kwargs": "not json"})));

        let skipping = ToolPolicy {
            skip_confirmations: true,
            ..Default::default()
        };
        assert!(skipping.is_confirmed(&json!({})));
    }

    #[test]
    fn test_confirmation_request_mentions_kwargs() {
        let msg = confirmation_request("zia_delete_url_category", "URL category CUSTOM_01");
        assert!(msg.contains("zia_delete_url_category"));
        assert!(msg.contains("kwargs='{\"confirmed\": true}'"));
    }
}
