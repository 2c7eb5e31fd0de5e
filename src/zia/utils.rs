//! ZIA argument utilities
//!
//! Parsing and validation shared by the ZIA managers: list arguments given as
//! JSON or strings, port specifications, and enumerated filter values.

use serde_json::Value;

use crate::error::{Result, ValidationError, ZiaMcpError};
use crate::zia::types::PortRange;

/// Protocols accepted by the network service list filter
pub const NETWORK_PROTOCOLS: [&str; 6] = ["ICMP", "TCP", "UDP", "GRE", "ESP", "OTHER"];

/// Locales accepted for localized descriptions
pub const LOCALES: [&str; 6] = ["en-US", "de-DE", "es-ES", "fr-FR", "ja-JP", "zh-CN"];

fn invalid(name: &str, message: impl Into<String>) -> ZiaMcpError {
    ZiaMcpError::Validation(ValidationError::invalid(name, message))
}

/// Reject empty or whitespace-only required strings
pub fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZiaMcpError::Validation(ValidationError::missing(name)));
    }
    Ok(())
}

/// Accept a JSON array, or a string holding a JSON array.
///
/// With `allow_csv`, a string that is not JSON is split on commas instead.
pub fn parse_list_arg(name: &str, value: &Value, allow_csv: bool) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Err(invalid(name, "must be a list")),
            Err(e) if allow_csv => {
                tracing::debug!("{} is not JSON ({}), splitting on commas", name, e);
                Ok(raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect())
            }
            Err(e) => Err(invalid(name, format!("invalid JSON: {}", e))),
        },
        _ => Err(invalid(name, "must be a list")),
    }
}

/// Drop an optional list argument that holds nothing: null, `[]`, a blank
/// string, or a string holding `[]`
pub fn non_empty_list(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::String(raw) => {
            let raw = raw.trim();
            !raw.is_empty() && raw.split_whitespace().collect::<String>() != "[]"
        }
        _ => true,
    })
}

/// Parse a list of strings; numbers are stringified
pub fn parse_string_list(name: &str, value: &Value, allow_csv: bool) -> Result<Vec<String>> {
    parse_list_arg(name, value, allow_csv)?
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(invalid(name, format!("unexpected item {}", other))),
        })
        .collect()
}

/// Parse a list of numeric IDs given as numbers or numeric strings
pub fn parse_id_list(name: &str, value: &Value) -> Result<Vec<i64>> {
    parse_string_list(name, value, false)?
        .into_iter()
        .map(|id| {
            id.trim()
                .parse::<i64>()
                .map_err(|_| invalid(name, format!("'{}' is not a numeric ID", id)))
        })
        .collect()
}

/// Validate a protocol filter and return it uppercased
pub fn normalize_protocol(protocol: &str) -> Result<String> {
    let upper = protocol.trim().to_ascii_uppercase();
    if NETWORK_PROTOCOLS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(invalid(
            "protocol",
            format!(
                "'{}' is not supported (expected one of {})",
                protocol,
                NETWORK_PROTOCOLS.join(", ")
            ),
        ))
    }
}

/// Validate a locale filter
pub fn validate_locale(locale: &str) -> Result<()> {
    if LOCALES.contains(&locale) {
        Ok(())
    } else {
        Err(invalid(
            "locale",
            format!(
                "'{}' is not supported (expected one of {})",
                locale,
                LOCALES.join(", ")
            ),
        ))
    }
}

/// Ports grouped by direction and protocol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSet {
    pub src_tcp: Vec<PortRange>,
    pub dest_tcp: Vec<PortRange>,
    pub src_udp: Vec<PortRange>,
    pub dest_udp: Vec<PortRange>,
}

impl PortSet {
    pub fn is_empty(&self) -> bool {
        self.src_tcp.is_empty()
            && self.dest_tcp.is_empty()
            && self.src_udp.is_empty()
            && self.dest_udp.is_empty()
    }
}

/// Parse port tuples `[direction, protocol, start, end?]`
///
/// Accepts a JSON array or a string containing one, e.g.
/// `[["dest", "tcp", "80", "443"], ["dest", "udp", "53"]]`.
pub fn parse_port_specs(value: &Value) -> Result<PortSet> {
    let tuples = parse_list_arg("ports", value, false)?;
    let mut set = PortSet::default();

    for tuple in tuples {
        let items = match &tuple {
            Value::Array(items) if items.len() >= 3 => items,
            _ => {
                return Err(invalid(
                    "ports",
                    format!(
                        "invalid port tuple {}; expected [\"src\"|\"dest\", \"tcp\"|\"udp\", start, end?]",
                        tuple
                    ),
                ))
            }
        };

        let direction = items[0].as_str().unwrap_or_default();
        let protocol = items[1].as_str().unwrap_or_default().to_ascii_lowercase();
        let start = parse_port(&items[2])?;
        let end = match items.get(3) {
            Some(v) if !v.is_null() => Some(parse_port(v)?),
            _ => None,
        };

        if let Some(end) = end {
            if end < start {
                return Err(invalid(
                    "ports",
                    format!("end port {} is lower than start port {}", end, start),
                ));
            }
        }

        let range = PortRange { start, end };
        let target = match (direction, protocol.as_str()) {
            ("src", "tcp") => &mut set.src_tcp,
            ("dest", "tcp") => &mut set.dest_tcp,
            ("src", "udp") => &mut set.src_udp,
            ("dest", "udp") => &mut set.dest_udp,
            ("src" | "dest", other) => {
                return Err(invalid(
                    "ports",
                    format!("invalid protocol '{}'; must be 'tcp' or 'udp'", other),
                ))
            }
            (other, _) => {
                return Err(invalid(
                    "ports",
                    format!("invalid direction '{}'; must be 'src' or 'dest'", other),
                ))
            }
        };
        target.push(range);
    }

    Ok(set)
}

fn parse_port(value: &Value) -> Result<u16> {
    let port = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match port {
        Some(p) if (1..=65535).contains(&p) => Ok(p as u16),
        _ => Err(invalid(
            "ports",
            format!("{} is not a port number between 1 and 65535", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_list_arg_variants() {
        assert_eq!(parse_list_arg("x", &json!(["a"]), false).unwrap(), vec![json!("a")]);
        assert_eq!(
            parse_list_arg("x", &json!("[\"a\", 1]"), false).unwrap(),
            vec![json!("a"), json!(1)]
        );
        assert_eq!(
            parse_string_list("x", &json!("DROPBOX, BOX ,"), true).unwrap(),
            vec!["DROPBOX", "BOX"]
        );
        assert!(parse_list_arg("x", &json!("not json"), false).is_err());
        assert!(parse_list_arg("x", &json!({"a": 1}), false).is_err());
        assert!(parse_list_arg("x", &json!("{\"a\": 1}"), true).is_err());
    }

    #[test]
    fn test_non_empty_list() {
        assert_eq!(non_empty_list(None), None);
        assert_eq!(non_empty_list(Some(&json!(null))), None);
        assert_eq!(non_empty_list(Some(&json!([]))), None);
        assert_eq!(non_empty_list(Some(&json!("  "))), None);
        assert_eq!(non_empty_list(Some(&json!("[ ]"))), None);
        assert_eq!(non_empty_list(Some(&json!([1]))), Some(&json!([1])));
        assert_eq!(non_empty_list(Some(&json!("[1]"))), Some(&json!("[1]")));
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            parse_id_list("service_ids", &json!("[\"159143\", 159144]")).unwrap(),
            vec![159143, 159144]
        );
        let err = parse_id_list("service_ids", &json!(["abc"])).unwrap_err();
        assert!(err.to_string().contains("not a numeric ID"));
    }

    #[test]
    fn test_normalize_protocol() {
        assert_eq!(normalize_protocol("tcp").unwrap(), "TCP");
        assert!(normalize_protocol("SCTP").is_err());
    }

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("fr-FR").is_ok());
        assert!(validate_locale("fr-fr").is_err());
    }

    #[test]
    fn test_parse_port_specs_groups_ranges() {
        let set = parse_port_specs(&json!(
            "[[\"dest\", \"tcp\", \"389\"], [\"dest\", \"TCP\", 80, \"443\"], [\"src\", \"udp\", \"1024\", \"65535\"]]"
        ))
        .unwrap();

        assert_eq!(
            set.dest_tcp,
            vec![
                PortRange { start: 389, end: None },
                PortRange { start: 80, end: Some(443) },
            ]
        );
        assert_eq!(set.src_udp, vec![PortRange { start: 1024, end: Some(65535) }]);
        assert!(set.src_tcp.is_empty());
        assert!(set.dest_udp.is_empty());
    }

    #[test]
    fn test_parse_port_specs_rejects_bad_tuples() {
        assert!(parse_port_specs(&json!([["dest", "tcp"]])).is_err());
        assert!(parse_port_specs(&json!([["both", "tcp", "22"]])).is_err());
        assert!(parse_port_specs(&json!([["dest", "icmp", "22"]])).is_err());
        assert!(parse_port_specs(&json!([["dest", "tcp", "0"]])).is_err());
        assert!(parse_port_specs(&json!([["dest", "tcp", "70000"]])).is_err());
        assert!(parse_port_specs(&json!([["dest", "tcp", "443", "80"]])).is_err());
        assert!(parse_port_specs(&json!("[[")).is_err());
    }
}
