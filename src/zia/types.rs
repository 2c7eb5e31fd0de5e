//! ZIA API type definitions
//!
//! These types mirror the ZIA API payloads. Fields the server does not act on
//! are kept in `extra` so tool output shows the full record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A port or port range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub start: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u16>,
}

/// A Cloud Firewall network service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// STANDARD, PREDEFINED or CUSTOM
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    #[serde(default)]
    pub src_tcp_ports: Vec<PortRange>,

    #[serde(default)]
    pub dest_tcp_ports: Vec<PortRange>,

    #[serde(default)]
    pub src_udp_ports: Vec<PortRange>,

    #[serde(default)]
    pub dest_udp_ports: Vec<PortRange>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to another object by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdRef {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            extra: Map::new(),
        }
    }
}

/// A group of network services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkServiceGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub services: Vec<IdRef>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A Cloud Firewall network application (read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkApp {
    /// Application identifier, e.g. "ICMP_ANY"
    pub id: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A URL category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configured_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_category: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_ranges: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub db_categorized_urls: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords_retaining_parent_category: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_ranges_retaining_parent_category: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for adding or removing URLs on a category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlListUpdate<'a> {
    pub configured_name: &'a str,
    pub urls: &'a [String],
}

/// One entry of a URL lookup report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlLookupEntry {
    pub url: String,

    #[serde(default)]
    pub url_classifications: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub url_classifications_with_security_alert: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A device group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A device registered with ZIA
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for the Cloud App Control available-actions query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableActionsRequest<'a> {
    pub cloud_apps: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_service_keeps_unknown_fields() {
        let json = serde_json::json!({
            "id": 159143,
            "name": "DNS",
            "type": "PREDEFINED",
            "destTcpPorts": [{"start": 53}],
            "destUdpPorts": [{"start": 53}],
            "isNameL10nTag": true
        });

        let svc: NetworkService = serde_json::from_value(json).unwrap();
        assert_eq!(svc.service_type.as_deref(), Some("PREDEFINED"));
        assert_eq!(svc.dest_tcp_ports, vec![PortRange { start: 53, end: None }]);
        assert!(svc.src_tcp_ports.is_empty());

        let out = serde_json::to_value(&svc).unwrap();
        assert_eq!(out["isNameL10nTag"], true);
        assert_eq!(out["type"], "PREDEFINED");
    }

    #[test]
    fn test_url_category_omits_empty_lists() {
        let category = UrlCategory {
            configured_name: Some("Partners".to_string()),
            super_category: Some("USER_DEFINED".to_string()),
            custom_category: Some(true),
            urls: vec!["acme.com".to_string()],
            ..Default::default()
        };

        let out = serde_json::to_value(&category).unwrap();
        assert_eq!(out["configuredName"], "Partners");
        assert_eq!(out["urls"][0], "acme.com");
        assert!(out.get("keywords").is_none());
        assert!(out.get("id").is_none());
    }

    #[test]
    fn test_group_services_serialize_as_id_refs() {
        let group = NetworkServiceGroup {
            name: "Web".to_string(),
            services: vec![IdRef::new(1), IdRef::new(2)],
            ..Default::default()
        };

        let out = serde_json::to_value(&group).unwrap();
        assert_eq!(out["services"], serde_json::json!([{"id": 1}, {"id": 2}]));
    }
}
