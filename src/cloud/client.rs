//! Google Cloud REST client
//!
//! Thin wrapper over `reqwest` that authenticates every request with the
//! configured OAuth bearer token and maps HTTP failures onto [`AppError`].

use crate::config::CloudConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::*;
use super::CloudApi;

/// Server-side filter applied to the enabled-service listing
const ENABLED_FILTER: &str = "state:ENABLED";
/// Partial response mask; only service names are needed
const SERVICE_NAME_FIELDS: &str = "services.name";

/// Google Cloud REST API client
#[derive(Clone)]
pub struct CloudClient {
    config: CloudConfig,
    http_client: Client,
}

impl CloudClient {
    /// Create a new Cloud API client
    pub fn new(config: CloudConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!(operation, url, "Calling Cloud API");

        let mut request = self
            .http_client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .query(query);
        if let Some(ref api_key) = self.config.api_key {
            request = request.query(&[("key", api_key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::CloudApi(format!("Failed to {}: {}", operation, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => {
                    AppError::Unauthorized(format!("Failed to {}: {}", operation, body))
                }
                StatusCode::FORBIDDEN => {
                    AppError::Forbidden(format!("Failed to {}: {}", operation, body))
                }
                StatusCode::NOT_FOUND => {
                    AppError::NotFound(format!("Failed to {}: {}", operation, body))
                }
                _ => AppError::CloudApi(format!(
                    "Failed to {}: {} - {}",
                    operation, status, body
                )),
            });
        }

        response.json().await.map_err(|e| {
            AppError::CloudApi(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}

#[async_trait]
impl CloudApi for CloudClient {
    async fn list_enabled_services(&self, parent: &str) -> Result<ListServicesResponse> {
        let url = format!("{}/v1/{}/services", self.config.service_usage_url, parent);
        self.get_json(
            "list enabled services",
            &url,
            &[("filter", ENABLED_FILTER), ("fields", SERVICE_NAME_FIELDS)],
        )
        .await
    }

    async fn list_directory_projects(&self) -> Result<ListProjectsResponse> {
        let url = format!("{}/v1/projects", self.config.resource_manager_url);
        self.get_json("list projects", &url, &[]).await
    }

    async fn list_keys(&self, parent: &str) -> Result<ListKeysResponse> {
        let url = format!("{}/v2/{}/keys", self.config.api_keys_url, parent);
        self.get_json("list keys", &url, &[]).await
    }

    async fn get_key_string(&self, name: &str) -> Result<KeyStringResponse> {
        let url = format!("{}/v2/{}/keyString", self.config.api_keys_url, name);
        self.get_json("get key string", &url, &[]).await
    }
}
