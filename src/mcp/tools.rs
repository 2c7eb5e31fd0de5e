//! MCP Tool definitions and handlers
//!
//! Defines all available ZIA tools and their implementations.

use std::sync::Arc;

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::{McpError, Result};
use crate::mcp::args::*;
use crate::mcp::policy::{confirmation_request, ToolKind, ToolPolicy};
use crate::mcp::types::{CallToolResult, Tool, ToolAnnotations};
use crate::zia::client::ZiaClient;
use crate::zia::devices::DeviceFilter;
use crate::zia::firewall::NetworkServiceFilter;
use crate::zia::url_categories::UrlCategoryFields;
use crate::zia::utils::{non_empty_list, parse_id_list, parse_port_specs, parse_string_list};

/// Static description of one tool
struct ToolEntry {
    name: &'static str,
    description: &'static str,
    kind: ToolKind,
    schema: fn() -> Value,
}

const fn read(name: &'static str, description: &'static str, schema: fn() -> Value) -> ToolEntry {
    ToolEntry {
        name,
        description,
        kind: ToolKind::Read,
        schema,
    }
}

const fn write(name: &'static str, description: &'static str, schema: fn() -> Value) -> ToolEntry {
    ToolEntry {
        name,
        description,
        kind: ToolKind::Write,
        schema,
    }
}

const fn destructive(
    name: &'static str,
    description: &'static str,
    schema: fn() -> Value,
) -> ToolEntry {
    ToolEntry {
        name,
        description,
        kind: ToolKind::Destructive,
        schema,
    }
}

static TOOLS: &[ToolEntry] = &[
    // Firewall
    read(
        "zia_list_network_services",
        "Lists ZIA network services, optionally filtered by search text, protocol or locale",
        input_schema::<ListNetworkServicesArgs>,
    ),
    read(
        "zia_get_network_service",
        "Gets a ZIA network service by ID",
        input_schema::<NetworkServiceIdArgs>,
    ),
    write(
        "zia_create_network_service",
        "Creates a custom ZIA network service from TCP/UDP port specs",
        input_schema::<CreateNetworkServiceArgs>,
    ),
    write(
        "zia_update_network_service",
        "Updates a ZIA network service; ports are replaced only when given",
        input_schema::<UpdateNetworkServiceArgs>,
    ),
    destructive(
        "zia_delete_network_service",
        "Deletes a ZIA network service (requires confirmation)",
        input_schema::<NetworkServiceIdArgs>,
    ),
    read(
        "zia_list_network_svc_groups",
        "Lists ZIA network service groups",
        input_schema::<ListNetworkSvcGroupsArgs>,
    ),
    read(
        "zia_get_network_svc_group",
        "Gets a ZIA network service group by ID",
        input_schema::<NetworkSvcGroupIdArgs>,
    ),
    write(
        "zia_create_network_svc_group",
        "Creates a ZIA network service group from network service IDs",
        input_schema::<CreateNetworkSvcGroupArgs>,
    ),
    write(
        "zia_update_network_svc_group",
        "Updates a ZIA network service group; members are replaced only when given",
        input_schema::<UpdateNetworkSvcGroupArgs>,
    ),
    destructive(
        "zia_delete_network_svc_group",
        "Deletes a ZIA network service group (requires confirmation)",
        input_schema::<NetworkSvcGroupIdArgs>,
    ),
    read(
        "zia_list_network_apps",
        "Lists the ZIA network application catalogue (read-only)",
        input_schema::<ListNetworkAppsArgs>,
    ),
    read(
        "zia_get_network_app",
        "Gets a ZIA network application by ID",
        input_schema::<NetworkAppIdArgs>,
    ),
    // URL categories
    read(
        "zia_list_url_categories",
        "Lists ZIA URL categories",
        input_schema::<ListUrlCategoriesArgs>,
    ),
    read(
        "zia_get_url_category",
        "Gets a ZIA URL category by ID",
        input_schema::<UrlCategoryIdArgs>,
    ),
    write(
        "zia_create_url_category",
        "Creates a ZIA URL category",
        input_schema::<CreateUrlCategoryArgs>,
    ),
    write(
        "zia_update_url_category",
        "Replaces the configuration of a ZIA URL category",
        input_schema::<UpdateUrlCategoryArgs>,
    ),
    write(
        "zia_add_urls_to_category",
        "Adds URLs to a ZIA URL category without changing its other settings",
        input_schema::<UrlListChangeArgs>,
    ),
    destructive(
        "zia_remove_urls_from_category",
        "Removes URLs from a ZIA URL category (requires confirmation)",
        input_schema::<UrlListChangeArgs>,
    ),
    destructive(
        "zia_delete_url_category",
        "Deletes a ZIA URL category (requires confirmation)",
        input_schema::<UrlCategoryIdArgs>,
    ),
    read(
        "zia_url_lookup",
        "Looks up the ZIA categories and security alerts of URLs or domains",
        input_schema::<UrlLookupArgs>,
    ),
    // Devices
    read(
        "zia_list_device_groups",
        "Lists ZIA device groups",
        input_schema::<ListDeviceGroupsArgs>,
    ),
    read(
        "zia_list_devices",
        "Lists ZIA devices with optional name, owner and paging filters",
        input_schema::<ListDevicesArgs>,
    ),
    read(
        "zia_list_devices_lite",
        "Lists ZIA devices with only ID, name and owner",
        input_schema::<ListDevicesLiteArgs>,
    ),
    // Cloud app control
    read(
        "zia_list_cloud_app_control_actions",
        "Lists the Cloud App Control actions available for a rule type and cloud apps",
        input_schema::<CloudAppActionsArgs>,
    ),
];

fn find_tool(name: &str) -> Option<&'static ToolEntry> {
    TOOLS.iter().find(|t| t.name == name)
}

/// Tool handler
pub struct ToolHandler {
    zia_client: Arc<ZiaClient>,
    policy: ToolPolicy,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(zia_client: Arc<ZiaClient>, policy: ToolPolicy) -> Self {
        Self { zia_client, policy }
    }

    /// List the tools the current policy exposes
    pub fn list_tools(&self) -> Vec<Tool> {
        TOOLS
            .iter()
            .filter(|t| self.policy.check(t.name, t.kind).is_ok())
            .map(tool_def)
            .collect()
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        let Some(entry) = find_tool(name) else {
            return CallToolResult::error(
                McpError::UnknownTool {
                    name: name.to_string(),
                }
                .to_string(),
            );
        };

        if let Err(e) = self.policy.check(entry.name, entry.kind) {
            tracing::warn!("Rejected call to {}: {}", name, e);
            return CallToolResult::error(e.to_string());
        }

        let args = if args.is_null() { json!({}) } else { args };

        if entry.kind == ToolKind::Destructive && !self.policy.is_confirmed(&args) {
            tracing::info!("{} awaiting confirmation", name);
            return CallToolResult::text(confirmation_request(
                entry.name,
                &confirmation_target(entry.name, &args),
            ));
        }

        match self.dispatch(entry.name, args).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("{} failed: {}", name, e);
                CallToolResult::error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<CallToolResult> {
        match name {
            "zia_list_network_services" => self.handle_list_network_services(args).await,
            "zia_get_network_service" => self.handle_get_network_service(args).await,
            "zia_create_network_service" => self.handle_create_network_service(args).await,
            "zia_update_network_service" => self.handle_update_network_service(args).await,
            "zia_delete_network_service" => self.handle_delete_network_service(args).await,
            "zia_list_network_svc_groups" => self.handle_list_network_svc_groups(args).await,
            "zia_get_network_svc_group" => self.handle_get_network_svc_group(args).await,
            "zia_create_network_svc_group" => self.handle_create_network_svc_group(args).await,
            "zia_update_network_svc_group" => self.handle_update_network_svc_group(args).await,
            "zia_delete_network_svc_group" => self.handle_delete_network_svc_group(args).await,
            "zia_list_network_apps" => self.handle_list_network_apps(args).await,
            "zia_get_network_app" => self.handle_get_network_app(args).await,
            "zia_list_url_categories" => self.handle_list_url_categories(args).await,
            "zia_get_url_category" => self.handle_get_url_category(args).await,
            "zia_create_url_category" => self.handle_create_url_category(args).await,
            "zia_update_url_category" => self.handle_update_url_category(args).await,
            "zia_add_urls_to_category" => self.handle_change_urls(args, true).await,
            "zia_remove_urls_from_category" => self.handle_change_urls(args, false).await,
            "zia_delete_url_category" => self.handle_delete_url_category(args).await,
            "zia_url_lookup" => self.handle_url_lookup(args).await,
            "zia_list_device_groups" => self.handle_list_device_groups(args).await,
            "zia_list_devices" => self.handle_list_devices(args).await,
            "zia_list_devices_lite" => self.handle_list_devices_lite(args).await,
            "zia_list_cloud_app_control_actions" => self.handle_cloud_app_actions(args).await,
            _ => Err(McpError::UnknownTool {
                name: name.to_string(),
            }
            .into()),
        }
    }

    // ==================== Firewall ====================

    async fn handle_list_network_services(&self, args: Value) -> Result<CallToolResult> {
        let args: ListNetworkServicesArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let filter = NetworkServiceFilter {
            search: args.search,
            protocol: args.protocol,
            locale: args.locale,
        };

        let services = self
            .zia_client
            .firewall(mode)
            .list_network_services(filter)
            .await?;
        Ok(CallToolResult::json(&services))
    }

    async fn handle_get_network_service(&self, args: Value) -> Result<CallToolResult> {
        let args: NetworkServiceIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let service = self
            .zia_client
            .firewall(mode)
            .get_network_service(&args.service_id.to_string())
            .await?;
        Ok(CallToolResult::json(&service))
    }

    async fn handle_create_network_service(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateNetworkServiceArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let ports = parse_port_specs(&args.ports)?;

        let service = self
            .zia_client
            .firewall(mode)
            .create_network_service(&args.name, ports, args.description)
            .await?;
        Ok(CallToolResult::json(&service))
    }

    async fn handle_update_network_service(&self, args: Value) -> Result<CallToolResult> {
        let args: UpdateNetworkServiceArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let ports = non_empty_list(args.ports.as_ref())
            .map(parse_port_specs)
            .transpose()?;

        let service = self
            .zia_client
            .firewall(mode)
            .update_network_service(&args.service_id.to_string(), &args.name, ports, args.description)
            .await?;
        Ok(CallToolResult::json(&service))
    }

    async fn handle_delete_network_service(&self, args: Value) -> Result<CallToolResult> {
        let args: NetworkServiceIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let id = args.service_id.to_string();

        self.zia_client
            .firewall(mode)
            .delete_network_service(&id)
            .await?;
        Ok(CallToolResult::text(format!(
            "Network service {} deleted successfully",
            id
        )))
    }

    async fn handle_list_network_svc_groups(&self, args: Value) -> Result<CallToolResult> {
        let args: ListNetworkSvcGroupsArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let groups = self
            .zia_client
            .firewall(mode)
            .list_network_svc_groups(args.search)
            .await?;
        Ok(CallToolResult::json(&groups))
    }

    async fn handle_get_network_svc_group(&self, args: Value) -> Result<CallToolResult> {
        let args: NetworkSvcGroupIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let group = self
            .zia_client
            .firewall(mode)
            .get_network_svc_group(&args.group_id.to_string())
            .await?;
        Ok(CallToolResult::json(&group))
    }

    async fn handle_create_network_svc_group(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateNetworkSvcGroupArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let service_ids = parse_id_list("service_ids", &args.service_ids)?;

        let group = self
            .zia_client
            .firewall(mode)
            .create_network_svc_group(&args.name, service_ids, args.description)
            .await?;
        Ok(CallToolResult::json(&group))
    }

    async fn handle_update_network_svc_group(&self, args: Value) -> Result<CallToolResult> {
        let args: UpdateNetworkSvcGroupArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let service_ids = non_empty_list(args.service_ids.as_ref())
            .map(|v| parse_id_list("service_ids", v))
            .transpose()?;

        let group = self
            .zia_client
            .firewall(mode)
            .update_network_svc_group(
                &args.group_id.to_string(),
                &args.name,
                service_ids,
                args.description,
            )
            .await?;
        Ok(CallToolResult::json(&group))
    }

    async fn handle_delete_network_svc_group(&self, args: Value) -> Result<CallToolResult> {
        let args: NetworkSvcGroupIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let id = args.group_id.to_string();

        self.zia_client
            .firewall(mode)
            .delete_network_svc_group(&id)
            .await?;
        Ok(CallToolResult::text(format!(
            "Network service group {} deleted successfully",
            id
        )))
    }

    async fn handle_list_network_apps(&self, args: Value) -> Result<CallToolResult> {
        let args: ListNetworkAppsArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let apps = self
            .zia_client
            .firewall(mode)
            .list_network_apps(args.search, args.locale)
            .await?;
        Ok(CallToolResult::json(&apps))
    }

    async fn handle_get_network_app(&self, args: Value) -> Result<CallToolResult> {
        let args: NetworkAppIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let app = self
            .zia_client
            .firewall(mode)
            .get_network_app(&args.app_id.to_string())
            .await?;
        Ok(CallToolResult::json(&app))
    }

    // ==================== URL Categories ====================

    async fn handle_list_url_categories(&self, args: Value) -> Result<CallToolResult> {
        let args: ListUrlCategoriesArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let categories = self
            .zia_client
            .url_categories(mode)
            .list(args.custom_only, args.include_only_url_keyword_counts)
            .await?;
        Ok(CallToolResult::json(&categories))
    }

    async fn handle_get_url_category(&self, args: Value) -> Result<CallToolResult> {
        let args: UrlCategoryIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let category = self
            .zia_client
            .url_categories(mode)
            .get(&args.category_id.to_string())
            .await?;
        Ok(CallToolResult::json(&category))
    }

    async fn handle_create_url_category(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateUrlCategoryArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let fields = category_fields(args.content)?;

        let category = self
            .zia_client
            .url_categories(mode)
            .create(
                &args.configured_name,
                &args.super_category,
                args.custom_category.unwrap_or(true),
                fields,
            )
            .await?;
        Ok(CallToolResult::json(&category))
    }

    async fn handle_update_url_category(&self, args: Value) -> Result<CallToolResult> {
        let args: UpdateUrlCategoryArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let fields = category_fields(args.content)?;

        let category = self
            .zia_client
            .url_categories(mode)
            .update(&args.category_id.to_string(), &args.configured_name, fields)
            .await?;
        Ok(CallToolResult::json(&category))
    }

    async fn handle_change_urls(&self, args: Value, add: bool) -> Result<CallToolResult> {
        let args: UrlListChangeArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let urls = parse_string_list("urls", &args.urls, true)?;
        let manager = self.zia_client.url_categories(mode);
        let id = args.category_id.to_string();

        let category = if add {
            manager.add_urls(&id, &args.configured_name, &urls).await?
        } else {
            manager.remove_urls(&id, &args.configured_name, &urls).await?
        };
        Ok(CallToolResult::json(&category))
    }

    async fn handle_delete_url_category(&self, args: Value) -> Result<CallToolResult> {
        let args: UrlCategoryIdArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let id = args.category_id.to_string();

        self.zia_client.url_categories(mode).delete(&id).await?;
        Ok(CallToolResult::text(format!("Deleted URL category {}", id)))
    }

    async fn handle_url_lookup(&self, args: Value) -> Result<CallToolResult> {
        let args: UrlLookupArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let urls = parse_string_list("urls", &args.urls, true)?;

        let results = self.zia_client.url_categories(mode).lookup(&urls).await?;
        Ok(CallToolResult::json(&results))
    }

    // ==================== Devices ====================

    async fn handle_list_device_groups(&self, args: Value) -> Result<CallToolResult> {
        let args: ListDeviceGroupsArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let groups = self
            .zia_client
            .devices(mode)
            .list_groups(args.include_device_info, args.include_pseudo_groups)
            .await?;
        Ok(CallToolResult::json(&groups))
    }

    async fn handle_list_devices(&self, args: Value) -> Result<CallToolResult> {
        let args: ListDevicesArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let user_ids = match &args.user_ids {
            Some(v) => parse_string_list("user_ids", v, true)?,
            None => Vec::new(),
        };

        let filter = DeviceFilter {
            name: args.name,
            user_ids,
            include_all: args.include_all,
            page: args.page,
            page_size: args.page_size,
        };
        let devices = self.zia_client.devices(mode).list_devices(&filter).await?;
        Ok(CallToolResult::json(&devices))
    }

    async fn handle_list_devices_lite(&self, args: Value) -> Result<CallToolResult> {
        let args: ListDevicesLiteArgs = parse_args(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);

        let devices = self.zia_client.devices(mode).list_devices_lite().await?;
        Ok(CallToolResult::json(&devices))
    }

    // ==================== Cloud App Control ====================

    async fn handle_cloud_app_actions(&self, args: Value) -> Result<CallToolResult> {
        let args: CloudAppActionsArgs = parse_validated(args)?;
        let mode = self.zia_client.resolve_mode(args.use_legacy);
        let cloud_apps = parse_string_list("cloud_apps", &args.cloud_apps, true)?;

        let actions = self
            .zia_client
            .cloud_app_control(mode)
            .list_available_actions(&args.rule_type, &cloud_apps)
            .await?;
        Ok(CallToolResult::json(&actions))
    }
}

// ==================== Helpers ====================

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| {
        McpError::InvalidArguments {
            message: e.to_string(),
        }
        .into()
    })
}

fn parse_validated<T: DeserializeOwned + Validate>(args: Value) -> Result<T> {
    let args: T = parse_args(args)?;
    args.validate()?;
    Ok(args)
}

fn category_fields(content: UrlCategoryContentArgs) -> Result<UrlCategoryFields> {
    let list = |name: &str, value: Option<Value>| -> Result<Vec<String>> {
        match value {
            Some(v) => parse_string_list(name, &v, true),
            None => Ok(Vec::new()),
        }
    };

    Ok(UrlCategoryFields {
        urls: list("urls", content.urls)?,
        description: content.description,
        keywords: list("keywords", content.keywords)?,
        ip_ranges: list("ip_ranges", content.ip_ranges)?,
        db_categorized_urls: list("db_categorized_urls", content.db_categorized_urls)?,
        keywords_retaining_parent_category: list(
            "keywords_retaining_parent_category",
            content.keywords_retaining_parent_category,
        )?,
        ip_ranges_retaining_parent_category: list(
            "ip_ranges_retaining_parent_category",
            content.ip_ranges_retaining_parent_category,
        )?,
    })
}

fn confirmation_target(tool: &str, args: &Value) -> String {
    let id = |key: &str| match args.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "?".to_string(),
    };

    match tool {
        "zia_delete_network_service" => format!("network service {}", id("service_id")),
        "zia_delete_network_svc_group" => format!("network service group {}", id("group_id")),
        "zia_delete_url_category" => format!("URL category {}", id("category_id")),
        "zia_remove_urls_from_category" => {
            format!("the URL list of category {}", id("category_id"))
        }
        _ => tool.to_string(),
    }
}

// ==================== Schema Definitions ====================

fn tool_def(entry: &ToolEntry) -> Tool {
    Tool {
        name: entry.name.to_string(),
        description: Some(entry.description.to_string()),
        input_schema: (entry.schema)(),
        annotations: Some(ToolAnnotations {
            read_only_hint: entry.kind == ToolKind::Read,
            destructive_hint: entry.kind == ToolKind::Destructive,
        }),
    }
}

/// JSON schema for a tool's argument struct, inlined and without metadata keys
fn input_schema<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
            s.option_add_null_type = false;
        })
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();

    let mut value = serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"}));
    if let Value::Object(map) = &mut value {
        map.remove("$schema");
        map.remove("title");
        map.remove("definitions");
        map.entry("properties").or_insert_with(|| json!({}));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_unique() {
        let mut names: Vec<&str> = TOOLS.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TOOLS.len());
        assert_eq!(TOOLS.len(), 24);
    }

    #[test]
    fn test_every_tool_accepts_use_legacy() {
        for entry in TOOLS {
            let schema = (entry.schema)();
            assert!(
                schema["properties"].get("use_legacy").is_some(),
                "{} has no use_legacy",
                entry.name
            );
            assert!(schema.get("$schema").is_none());
        }
    }

    #[test]
    fn test_required_fields_in_schema() {
        let schema = input_schema::<CreateNetworkServiceArgs>();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"name"));
        assert!(required.contains(&"ports"));
        assert!(!required.contains(&"description"));
    }

    #[test]
    fn test_flattened_content_in_schema() {
        let schema = input_schema::<UpdateUrlCategoryArgs>();
        assert!(schema["properties"].get("keywords").is_some());
        assert!(schema["properties"].get("category_id").is_some());
    }

    #[test]
    fn test_destructive_tools() {
        let destructive: Vec<&str> = TOOLS
            .iter()
            .filter(|t| t.kind == ToolKind::Destructive)
            .map(|t| t.name)
            .collect();
        assert_eq!(
            destructive,
            vec![
                "zia_delete_network_service",
                "zia_delete_network_svc_group",
                "zia_remove_urls_from_category",
                "zia_delete_url_category",
            ]
        );
    }

    #[test]
    fn test_confirmation_target() {
        assert_eq!(
            confirmation_target("zia_delete_network_service", &json!({"service_id": 42})),
            "network service 42"
        );
        assert_eq!(
            confirmation_target("zia_delete_url_category", &json!({"category_id": "CUSTOM_01"})),
            "URL category CUSTOM_01"
        );
    }
}
