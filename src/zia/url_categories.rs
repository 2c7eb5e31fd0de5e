//! URL category management and URL lookup

use std::time::Duration;

use crate::error::{Result, ValidationError};
use crate::zia::auth::AuthMode;
use crate::zia::client::ZiaClient;
use crate::zia::types::{UrlCategory, UrlListUpdate, UrlLookupEntry};
use crate::zia::utils::require;

/// The lookup API accepts at most this many URLs per request
pub const LOOKUP_BATCH_SIZE: usize = 100;

/// Pause between lookup batches
const LOOKUP_BATCH_DELAY: Duration = Duration::from_secs(1);

/// Optional lists shared by create and update
#[derive(Debug, Clone, Default)]
pub struct UrlCategoryFields {
    pub urls: Vec<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub ip_ranges: Vec<String>,
    pub db_categorized_urls: Vec<String>,
    pub keywords_retaining_parent_category: Vec<String>,
    pub ip_ranges_retaining_parent_category: Vec<String>,
}

impl UrlCategoryFields {
    fn apply(self, category: &mut UrlCategory) {
        category.urls = self.urls;
        category.description = self.description.filter(|d| !d.is_empty());
        category.keywords = self.keywords;
        category.ip_ranges = self.ip_ranges;
        category.db_categorized_urls = self.db_categorized_urls;
        category.keywords_retaining_parent_category = self.keywords_retaining_parent_category;
        category.ip_ranges_retaining_parent_category = self.ip_ranges_retaining_parent_category;
    }
}

/// URL category manager for ZIA operations
pub struct UrlCategoryManager<'a> {
    client: &'a ZiaClient,
    mode: AuthMode,
}

impl<'a> UrlCategoryManager<'a> {
    /// Create a new URL category manager
    pub fn new(client: &'a ZiaClient, mode: AuthMode) -> Self {
        Self { client, mode }
    }

    fn category_path(category_id: &str) -> String {
        format!("/urlCategories/{}", urlencoding::encode(category_id.trim()))
    }

    /// List URL categories
    pub async fn list(
        &self,
        custom_only: Option<bool>,
        include_only_url_keyword_counts: Option<bool>,
    ) -> Result<Vec<UrlCategory>> {
        let mut query = Vec::new();
        if let Some(v) = custom_only {
            query.push(("customOnly", v.to_string()));
        }
        if let Some(v) = include_only_url_keyword_counts {
            query.push(("includeOnlyUrlKeywordCounts", v.to_string()));
        }

        self.client.get(self.mode, "/urlCategories", &query).await
    }

    /// Get a URL category by ID
    pub async fn get(&self, category_id: &str) -> Result<UrlCategory> {
        require("category_id", category_id)?;
        self.client
            .get(self.mode, &Self::category_path(category_id), &[])
            .await
    }

    /// Create a URL category
    pub async fn create(
        &self,
        configured_name: &str,
        super_category: &str,
        custom_category: bool,
        fields: UrlCategoryFields,
    ) -> Result<UrlCategory> {
        require("configured_name", configured_name)?;
        require("super_category", super_category)?;

        let mut category = UrlCategory {
            configured_name: Some(configured_name.to_string()),
            super_category: Some(super_category.to_string()),
            custom_category: Some(custom_category),
            ..Default::default()
        };
        fields.apply(&mut category);

        tracing::info!("Creating URL category '{}'", configured_name);
        self.client.post(self.mode, "/urlCategories", &category).await
    }

    /// Replace a URL category's configuration
    pub async fn update(
        &self,
        category_id: &str,
        configured_name: &str,
        fields: UrlCategoryFields,
    ) -> Result<UrlCategory> {
        require("category_id", category_id)?;
        require("configured_name", configured_name)?;

        let mut category = UrlCategory {
            configured_name: Some(configured_name.to_string()),
            ..Default::default()
        };
        fields.apply(&mut category);

        tracing::info!("Updating URL category {}", category_id);
        self.client
            .put(self.mode, &Self::category_path(category_id), &[], &category)
            .await
    }

    /// Add URLs to a category without touching the rest of it
    pub async fn add_urls(
        &self,
        category_id: &str,
        configured_name: &str,
        urls: &[String],
    ) -> Result<UrlCategory> {
        self.change_urls(category_id, configured_name, urls, "ADD_TO_LIST")
            .await
    }

    /// Remove URLs from a category
    pub async fn remove_urls(
        &self,
        category_id: &str,
        configured_name: &str,
        urls: &[String],
    ) -> Result<UrlCategory> {
        self.change_urls(category_id, configured_name, urls, "REMOVE_FROM_LIST")
            .await
    }

    async fn change_urls(
        &self,
        category_id: &str,
        configured_name: &str,
        urls: &[String],
        action: &str,
    ) -> Result<UrlCategory> {
        require("category_id", category_id)?;
        require("configured_name", configured_name)?;
        if urls.is_empty() {
            return Err(ValidationError::missing("urls").into());
        }

        let body = UrlListUpdate {
            configured_name,
            urls,
        };

        tracing::info!("{} on URL category {} ({} URLs)", action, category_id, urls.len());
        self.client
            .put(
                self.mode,
                &Self::category_path(category_id),
                &[("action", action.to_string())],
                &body,
            )
            .await
    }

    /// Delete a URL category
    pub async fn delete(&self, category_id: &str) -> Result<()> {
        require("category_id", category_id)?;
        tracing::info!("Deleting URL category {}", category_id);
        self.client
            .delete(self.mode, &Self::category_path(category_id))
            .await
    }

    /// Look up the categories of the given URLs
    ///
    /// URLs are sent in batches of [`LOOKUP_BATCH_SIZE`] with a short pause
    /// between batches; results keep the input order.
    pub async fn lookup(&self, urls: &[String]) -> Result<Vec<UrlLookupEntry>> {
        if urls.is_empty() {
            return Err(ValidationError::missing("urls").into());
        }

        let mut results = Vec::with_capacity(urls.len());
        for (idx, batch) in urls.chunks(LOOKUP_BATCH_SIZE).enumerate() {
            if idx > 0 {
                tokio::time::sleep(LOOKUP_BATCH_DELAY).await;
            }
            tracing::debug!("URL lookup batch {} ({} URLs)", idx + 1, batch.len());
            let entries: Vec<UrlLookupEntry> =
                self.client.post(self.mode, "/urlLookup", &batch).await?;
            results.extend(entries);
        }

        Ok(results)
    }
}
