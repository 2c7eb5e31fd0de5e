//! Cloud App Control (read-only)

use crate::error::{Result, ValidationError};
use crate::zia::auth::AuthMode;
use crate::zia::client::ZiaClient;
use crate::zia::types::AvailableActionsRequest;
use crate::zia::utils::require;

/// Cloud App Control manager for ZIA operations
pub struct CloudAppControlManager<'a> {
    client: &'a ZiaClient,
    mode: AuthMode,
}

impl<'a> CloudAppControlManager<'a> {
    /// Create a new Cloud App Control manager
    pub fn new(client: &'a ZiaClient, mode: AuthMode) -> Self {
        Self { client, mode }
    }

    /// List the granular actions available for a rule type and set of cloud apps
    pub async fn list_available_actions(
        &self,
        rule_type: &str,
        cloud_apps: &[String],
    ) -> Result<Vec<String>> {
        require("rule_type", rule_type)?;
        if cloud_apps.is_empty() {
            return Err(ValidationError::missing("cloud_apps").into());
        }

        let path = format!(
            "/webApplicationRules/{}/availableActions",
            urlencoding::encode(rule_type.trim())
        );
        let body = AvailableActionsRequest { cloud_apps };

        let actions: Option<Vec<String>> = self.client.post(self.mode, &path, &body).await?;
        Ok(actions.unwrap_or_default())
    }
}
