//! Google Cloud API type definitions
//!
//! Wire shapes for the Cloud Resource Manager, Service Usage and API Keys
//! list endpoints. Every collection and optional sub-object defaults to empty
//! so that absent fields never fail deserialization.

use serde::{Deserialize, Serialize};

/// Cloud Resource Manager v1 `projects.list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsResponse {
    #[serde(default)]
    pub projects: Vec<DirectoryProject>,
}

/// One project as known to the resource directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryProject {
    #[serde(default)]
    pub name: String,
    pub project_id: Option<String>,
    pub project_number: Option<String>,
}

/// Service Usage v1 `services.list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesResponse {
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

/// Enabled service, named `<parent>/services/<service id>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    #[serde(default)]
    pub name: String,
}

/// API Keys v2 `keys.list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysResponse {
    #[serde(default)]
    pub keys: Vec<ApiKey>,
}

/// Raw API key record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<KeyRestrictions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRestrictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_key_restrictions: Option<AndroidKeyRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_key_restrictions: Option<BrowserKeyRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_key_restrictions: Option<IosKeyRestrictions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidKeyRestrictions {
    #[serde(default)]
    pub allowed_applications: Vec<AndroidApplication>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidApplication {
    pub package_name: Option<String>,
    pub sha1_fingerprint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserKeyRestrictions {
    #[serde(default)]
    pub allowed_referrers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosKeyRestrictions {
    #[serde(default)]
    pub allowed_bundle_ids: Vec<String>,
}

/// API Keys v2 `keys.getKeyString` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStringResponse {
    pub key_string: Option<String>,
}
