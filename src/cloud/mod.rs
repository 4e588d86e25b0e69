//! Google Cloud API access
//!
//! The pipeline talks to three list-style APIs (Cloud Resource Manager,
//! Service Usage and API Keys) through the [`CloudApi`] trait. [`CloudClient`]
//! is the HTTP implementation; tests substitute a mock.

pub mod client;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;

pub use client::CloudClient;
pub use types::*;

/// Remote operations consumed by the discovery pipeline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// List the enabled services of `parent` (e.g. `projects/123`), names only.
    async fn list_enabled_services(&self, parent: &str) -> Result<ListServicesResponse>;

    /// List every project visible to the caller (single page).
    async fn list_directory_projects(&self) -> Result<ListProjectsResponse>;

    /// List the API keys under `parent` (e.g. `projects/123/locations/global`).
    async fn list_keys(&self, parent: &str) -> Result<ListKeysResponse>;

    /// Fetch the secret string of the key resource `name`.
    async fn get_key_string(&self, name: &str) -> Result<KeyStringResponse>;
}
