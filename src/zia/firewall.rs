//! Cloud Firewall objects
//!
//! Network services (custom TCP/UDP port definitions), network service groups,
//! and the read-only network application catalogue.

use crate::error::Result;
use crate::zia::auth::AuthMode;
use crate::zia::client::ZiaClient;
use crate::zia::types::{IdRef, NetworkApp, NetworkService, NetworkServiceGroup};
use crate::zia::utils::{normalize_protocol, require, validate_locale, PortSet};

/// Filters for listing network services
#[derive(Debug, Clone, Default)]
pub struct NetworkServiceFilter {
    pub search: Option<String>,
    pub protocol: Option<String>,
    pub locale: Option<String>,
}

/// Firewall manager for ZIA operations
pub struct FirewallManager<'a> {
    client: &'a ZiaClient,
    mode: AuthMode,
}

impl<'a> FirewallManager<'a> {
    /// Create a new firewall manager
    pub fn new(client: &'a ZiaClient, mode: AuthMode) -> Self {
        Self { client, mode }
    }

    // ==================== Network Services ====================

    /// List network services
    pub async fn list_network_services(
        &self,
        filter: NetworkServiceFilter,
    ) -> Result<Vec<NetworkService>> {
        let mut query = Vec::new();
        if let Some(search) = filter.search.filter(|s| !s.is_empty()) {
            query.push(("search", search));
        }
        if let Some(protocol) = filter.protocol.filter(|s| !s.is_empty()) {
            query.push(("protocol", normalize_protocol(&protocol)?));
        }
        if let Some(locale) = filter.locale.filter(|s| !s.is_empty()) {
            query.push(("locale", locale));
        }

        self.client.get(self.mode, "/networkServices", &query).await
    }

    /// Get a network service by ID
    pub async fn get_network_service(&self, service_id: &str) -> Result<NetworkService> {
        require("service_id", service_id)?;
        let path = format!("/networkServices/{}", urlencoding::encode(service_id.trim()));
        self.client.get(self.mode, &path, &[]).await
    }

    /// Create a custom network service
    pub async fn create_network_service(
        &self,
        name: &str,
        ports: PortSet,
        description: Option<String>,
    ) -> Result<NetworkService> {
        require("name", name)?;
        if ports.is_empty() {
            return Err(crate::error::ValidationError::missing("ports").into());
        }

        let mut service = NetworkService {
            name: name.to_string(),
            description: description.filter(|d| !d.is_empty()),
            service_type: Some("CUSTOM".to_string()),
            ..Default::default()
        };
        apply_ports(&mut service, ports);

        tracing::info!("Creating network service '{}'", name);
        self.client.post(self.mode, "/networkServices", &service).await
    }

    /// Update a network service
    ///
    /// When `ports` is `None` the existing port lists are kept; otherwise they
    /// are replaced entirely.
    pub async fn update_network_service(
        &self,
        service_id: &str,
        name: &str,
        ports: Option<PortSet>,
        description: Option<String>,
    ) -> Result<NetworkService> {
        require("service_id", service_id)?;
        require("name", name)?;

        let mut service = self.get_network_service(service_id).await?;
        service.name = name.to_string();
        if description.is_some() {
            service.description = description;
        }
        if let Some(ports) = ports {
            apply_ports(&mut service, ports);
        }

        let path = format!("/networkServices/{}", urlencoding::encode(service_id.trim()));
        tracing::info!("Updating network service {}", service_id);
        self.client.put(self.mode, &path, &[], &service).await
    }

    /// Delete a network service
    pub async fn delete_network_service(&self, service_id: &str) -> Result<()> {
        require("service_id", service_id)?;
        let path = format!("/networkServices/{}", urlencoding::encode(service_id.trim()));
        tracing::info!("Deleting network service {}", service_id);
        self.client.delete(self.mode, &path).await
    }

    // ==================== Network Service Groups ====================

    /// List network service groups
    pub async fn list_network_svc_groups(
        &self,
        search: Option<String>,
    ) -> Result<Vec<NetworkServiceGroup>> {
        let query: Vec<(&str, String)> = search
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s)])
            .unwrap_or_default();

        self.client.get(self.mode, "/networkServiceGroups", &query).await
    }

    /// Get a network service group by ID
    pub async fn get_network_svc_group(&self, group_id: &str) -> Result<NetworkServiceGroup> {
        require("group_id", group_id)?;
        let path = format!("/networkServiceGroups/{}", urlencoding::encode(group_id.trim()));
        self.client.get(self.mode, &path, &[]).await
    }

    /// Create a network service group
    pub async fn create_network_svc_group(
        &self,
        name: &str,
        service_ids: Vec<i64>,
        description: Option<String>,
    ) -> Result<NetworkServiceGroup> {
        require("name", name)?;
        if service_ids.is_empty() {
            return Err(crate::error::ValidationError::missing("service_ids").into());
        }

        let group = NetworkServiceGroup {
            name: name.to_string(),
            description: description.filter(|d| !d.is_empty()),
            services: service_ids.into_iter().map(IdRef::new).collect(),
            ..Default::default()
        };

        tracing::info!("Creating network service group '{}'", name);
        self.client.post(self.mode, "/networkServiceGroups", &group).await
    }

    /// Update a network service group
    ///
    /// When `service_ids` is `None` the current members are kept.
    pub async fn update_network_svc_group(
        &self,
        group_id: &str,
        name: &str,
        service_ids: Option<Vec<i64>>,
        description: Option<String>,
    ) -> Result<NetworkServiceGroup> {
        require("group_id", group_id)?;
        require("name", name)?;

        let current = self.get_network_svc_group(group_id).await?;
        let services = match service_ids {
            Some(ids) => ids.into_iter().map(IdRef::new).collect(),
            None => current
                .services
                .iter()
                .map(|s| IdRef::new(s.id))
                .collect(),
        };

        let group = NetworkServiceGroup {
            id: current.id,
            name: name.to_string(),
            description: description.or(current.description),
            services,
            ..Default::default()
        };

        let path = format!("/networkServiceGroups/{}", urlencoding::encode(group_id.trim()));
        tracing::info!("Updating network service group {}", group_id);
        self.client.put(self.mode, &path, &[], &group).await
    }

    /// Delete a network service group (member services are kept)
    pub async fn delete_network_svc_group(&self, group_id: &str) -> Result<()> {
        require("group_id", group_id)?;
        let path = format!("/networkServiceGroups/{}", urlencoding::encode(group_id.trim()));
        tracing::info!("Deleting network service group {}", group_id);
        self.client.delete(self.mode, &path).await
    }

    // ==================== Network Applications ====================

    /// List network applications
    pub async fn list_network_apps(
        &self,
        search: Option<String>,
        locale: Option<String>,
    ) -> Result<Vec<NetworkApp>> {
        let mut query = Vec::new();
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query.push(("search", search));
        }
        if let Some(locale) = locale.filter(|s| !s.is_empty()) {
            validate_locale(&locale)?;
            query.push(("locale", locale));
        }

        self.client.get(self.mode, "/networkApplications", &query).await
    }

    /// Get a network application by ID (e.g. "ICMP_ANY")
    pub async fn get_network_app(&self, app_id: &str) -> Result<NetworkApp> {
        require("app_id", app_id)?;
        let path = format!("/networkApplications/{}", urlencoding::encode(app_id.trim()));
        self.client.get(self.mode, &path, &[]).await
    }
}

fn apply_ports(service: &mut NetworkService, ports: PortSet) {
    service.src_tcp_ports = ports.src_tcp;
    service.dest_tcp_ports = ports.dest_tcp;
    service.src_udp_ports = ports.src_udp;
    service.dest_udp_ports = ports.dest_udp;
}
