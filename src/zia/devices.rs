//! Device management (read-only)

use crate::error::{Result, ValidationError, ZiaMcpError};
use crate::zia::auth::AuthMode;
use crate::zia::client::ZiaClient;
use crate::zia::types::{Device, DeviceGroup};

/// Largest page size the devices endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Filters for listing devices
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    /// Device name prefix
    pub name: Option<String>,
    pub user_ids: Vec<String>,
    /// Include Cloud Browser Isolation devices
    pub include_all: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl DeviceFilter {
    fn to_query(&self) -> Result<Vec<(&'static str, String)>> {
        let mut query = Vec::new();

        if let Some(name) = self.name.as_ref().filter(|n| !n.is_empty()) {
            query.push(("name", name.clone()));
        }
        if !self.user_ids.is_empty() {
            query.push(("userIds", self.user_ids.join(",")));
        }
        if let Some(include_all) = self.include_all {
            query.push(("includeAll", include_all.to_string()));
        }
        if let Some(page) = self.page {
            if page < 1 {
                return Err(ZiaMcpError::Validation(ValidationError::invalid(
                    "page",
                    "must be 1 or greater",
                )));
            }
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
                return Err(ZiaMcpError::Validation(ValidationError::invalid(
                    "page_size",
                    format!("must be between 1 and {}", MAX_PAGE_SIZE),
                )));
            }
            query.push(("pageSize", page_size.to_string()));
        }

        Ok(query)
    }
}

/// Device manager for ZIA operations
pub struct DeviceManager<'a> {
    client: &'a ZiaClient,
    mode: AuthMode,
}

impl<'a> DeviceManager<'a> {
    /// Create a new device manager
    pub fn new(client: &'a ZiaClient, mode: AuthMode) -> Self {
        Self { client, mode }
    }

    /// List device groups
    pub async fn list_groups(
        &self,
        include_device_info: Option<bool>,
        include_pseudo_groups: Option<bool>,
    ) -> Result<Vec<DeviceGroup>> {
        let mut query = Vec::new();
        if let Some(v) = include_device_info {
            query.push(("includeDeviceInfo", v.to_string()));
        }
        if let Some(v) = include_pseudo_groups {
            query.push(("includePseudoGroups", v.to_string()));
        }

        self.client.get(self.mode, "/deviceGroups", &query).await
    }

    /// List devices
    pub async fn list_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>> {
        let query = filter.to_query()?;
        self.client
            .get(self.mode, "/deviceGroups/devices", &query)
            .await
    }

    /// List devices with only ID, name and owner
    pub async fn list_devices_lite(&self) -> Result<Vec<Device>> {
        self.client
            .get(self.mode, "/deviceGroups/devices/lite", &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_filter_query() {
        let filter = DeviceFilter {
            name: Some("CORP-".to_string()),
            user_ids: vec!["12345".to_string(), "67890".to_string()],
            include_all: Some(false),
            page: Some(2),
            page_size: Some(500),
        };

        let query = filter.to_query().unwrap();
        assert_eq!(
            query,
            vec![
                ("name", "CORP-".to_string()),
                ("userIds", "12345,67890".to_string()),
                ("includeAll", "false".to_string()),
                ("page", "2".to_string()),
                ("pageSize", "500".to_string()),
            ]
        );
    }

    #[test]
    fn test_device_filter_bounds() {
        let filter = DeviceFilter {
            page: Some(0),
            ..Default::default()
        };
        assert!(filter.to_query().is_err());

        let filter = DeviceFilter {
            page_size: Some(1001),
            ..Default::default()
        };
        let err = filter.to_query().unwrap_err();
        assert!(err.to_string().contains("page_size"));

        assert!(DeviceFilter::default().to_query().unwrap().is_empty());
    }
}
