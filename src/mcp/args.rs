//! Tool argument types
//!
//! Each tool's input schema is generated from its argument struct, so the doc
//! comments here are what the client's model sees.

use std::fmt;

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Object ID given as a number or a string
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IdArg {
    Number(i64),
    Text(String),
}

impl fmt::Display for IdArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdArg::Number(n) => write!(f, "{}", n),
            IdArg::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// Lists may arrive as arrays or as JSON-encoded strings
fn list_or_string(_: &mut SchemaGenerator) -> Schema {
    Schema::Object(SchemaObject {
        instance_type: Some(vec![InstanceType::Array, InstanceType::String].into()),
        ..Default::default()
    })
}

// ==================== Firewall ====================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListNetworkServicesArgs {
    /// Filter by name or description
    pub search: Option<String>,
    /// Filter by protocol: ICMP, TCP, UDP, GRE, ESP or OTHER
    pub protocol: Option<String>,
    /// Locale for descriptions, e.g. en-US
    pub locale: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NetworkServiceIdArgs {
    /// Network service ID
    pub service_id: IdArg,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreateNetworkServiceArgs {
    /// Service name
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Port tuples [direction, protocol, start, end?], e.g.
    /// [["dest", "tcp", "80", "443"], ["dest", "udp", "53"]].
    /// Direction is src or dest; protocol is tcp or udp.
    #[schemars(schema_with = "list_or_string")]
    pub ports: Value,
    /// Service description
    #[validate(length(max = 10240))]
    pub description: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UpdateNetworkServiceArgs {
    /// Network service ID
    pub service_id: IdArg,
    /// New service name
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Replacement port tuples [direction, protocol, start, end?];
    /// omit or leave empty to keep the current ports
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub ports: Option<Value>,
    /// New description
    #[validate(length(max = 10240))]
    pub description: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListNetworkSvcGroupsArgs {
    /// Filter by name or description
    pub search: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NetworkSvcGroupIdArgs {
    /// Network service group ID
    pub group_id: IdArg,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreateNetworkSvcGroupArgs {
    /// Group name
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// IDs of the network services in the group
    #[schemars(schema_with = "list_or_string")]
    pub service_ids: Value,
    /// Group description
    pub description: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UpdateNetworkSvcGroupArgs {
    /// Network service group ID
    pub group_id: IdArg,
    /// New group name
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Replacement member service IDs; omit or leave empty to keep the
    /// current members
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub service_ids: Option<Value>,
    /// New description
    pub description: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListNetworkAppsArgs {
    /// Filter by name or description
    pub search: Option<String>,
    /// Locale for descriptions: en-US, de-DE, es-ES, fr-FR, ja-JP or zh-CN
    pub locale: Option<String>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NetworkAppIdArgs {
    /// Network application ID, e.g. ICMP_ANY
    pub app_id: IdArg,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

// ==================== URL Categories ====================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListUrlCategoriesArgs {
    /// Only return custom categories
    pub custom_only: Option<bool>,
    /// Return URL and keyword counts instead of the full lists
    pub include_only_url_keyword_counts: Option<bool>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UrlCategoryIdArgs {
    /// URL category ID, e.g. CUSTOM_01
    pub category_id: IdArg,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

/// Optional category contents shared by create and update
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UrlCategoryContentArgs {
    /// Category description
    pub description: Option<String>,
    /// URLs in the category
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub urls: Option<Value>,
    /// Keywords in the category
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub keywords: Option<Value>,
    /// Custom IP address ranges
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub ip_ranges: Option<Value>,
    /// URLs that are also kept in their predefined category
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub db_categorized_urls: Option<Value>,
    /// Keywords that keep their parent category
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub keywords_retaining_parent_category: Option<Value>,
    /// IP ranges that keep their parent category
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub ip_ranges_retaining_parent_category: Option<Value>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreateUrlCategoryArgs {
    /// Category name
    #[validate(length(min = 1, max = 255))]
    pub configured_name: String,
    /// Super category, e.g. USER_DEFINED
    #[validate(length(min = 1))]
    pub super_category: String,
    /// Whether this is a custom category (default true)
    pub custom_category: Option<bool>,
    #[serde(flatten)]
    pub content: UrlCategoryContentArgs,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UpdateUrlCategoryArgs {
    /// URL category ID
    pub category_id: IdArg,
    /// Category name
    #[validate(length(min = 1, max = 255))]
    pub configured_name: String,
    #[serde(flatten)]
    pub content: UrlCategoryContentArgs,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UrlListChangeArgs {
    /// URL category ID
    pub category_id: IdArg,
    /// Current category name (required by the API)
    #[validate(length(min = 1))]
    pub configured_name: String,
    /// URLs to add or remove
    #[schemars(schema_with = "list_or_string")]
    pub urls: Value,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UrlLookupArgs {
    /// URLs or domains to classify; a comma-separated string is accepted
    #[schemars(schema_with = "list_or_string")]
    pub urls: Value,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

// ==================== Devices ====================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDeviceGroupsArgs {
    /// Include device counts and details
    pub include_device_info: Option<bool>,
    /// Include pseudo groups such as "Unknown"
    pub include_pseudo_groups: Option<bool>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct ListDevicesArgs {
    /// Device name prefix
    pub name: Option<String>,
    /// Only devices owned by these user IDs
    #[serde(default)]
    #[schemars(schema_with = "list_or_string")]
    pub user_ids: Option<Value>,
    /// Include Cloud Browser Isolation devices
    pub include_all: Option<bool>,
    /// Page number, starting at 1
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    /// Page size, up to 1000
    #[validate(range(min = 1, max = 1000))]
    pub page_size: Option<u32>,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDevicesLiteArgs {
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

// ==================== Cloud App Control ====================

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CloudAppActionsArgs {
    /// Rule type, e.g. STREAMING_MEDIA, WEBMAIL or FILE_SHARE
    #[validate(length(min = 1))]
    pub rule_type: String,
    /// Cloud applications, e.g. ["YOUTUBE"]
    #[schemars(schema_with = "list_or_string")]
    pub cloud_apps: Value,
    /// Use the legacy session API instead of OneAPI
    pub use_legacy: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_arg_accepts_number_or_string() {
        let args: NetworkServiceIdArgs =
            serde_json::from_value(json!({"service_id": 42})).unwrap();
        assert_eq!(args.service_id.to_string(), "42");

        let args: UrlCategoryIdArgs =
            serde_json::from_value(json!({"category_id": " CUSTOM_01 "})).unwrap();
        assert_eq!(args.category_id.to_string(), "CUSTOM_01");
    }

    #[test]
    fn test_flattened_category_content() {
        let args: CreateUrlCategoryArgs = serde_json::from_value(json!({
            "configured_name": "Blocked",
            "super_category": "USER_DEFINED",
            "urls": ["a.example.com"],
            "keywords": "[\"casino\"]"
        }))
        .unwrap();
        assert!(args.content.urls.is_some());
        assert!(args.content.keywords.is_some());
        assert!(args.content.ip_ranges.is_none());
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let args: CreateNetworkServiceArgs = serde_json::from_value(json!({
            "name": "",
            "ports": [["dest", "tcp", 443]]
        }))
        .unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_page_size_range() {
        let args: ListDevicesArgs = serde_json::from_value(json!({"page_size": 5000})).unwrap();
        assert!(args.validate().is_err());

        let args: ListDevicesArgs = serde_json::from_value(json!({"page_size": 100})).unwrap();
        assert!(args.validate().is_ok());
    }
}
