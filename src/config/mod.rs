//! Configuration management for mapskeys

use anyhow::{Context, Result};
use std::env;

const DEFAULT_RESOURCE_MANAGER_URL: &str = "https://cloudresourcemanager.googleapis.com";
const DEFAULT_SERVICE_USAGE_URL: &str = "https://serviceusage.googleapis.com";
const DEFAULT_API_KEYS_URL: &str = "https://apikeys.googleapis.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Cloud API configuration
    pub cloud: CloudConfig,
    /// Logging configuration
    pub telemetry: TelemetryConfig,
    /// Fetch keys for all projects at once when building a summary
    pub summary_concurrent: bool,
}

#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Base URL of the Cloud Resource Manager API (project directory)
    pub resource_manager_url: String,
    /// Base URL of the Service Usage API (enabled services)
    pub service_usage_url: String,
    /// Base URL of the API Keys API
    pub api_keys_url: String,
    /// OAuth access token sent as a bearer token with every request
    pub access_token: String,
    /// Optional API key sent as the `key` query parameter
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" for flattened JSON lines, anything else for plain text
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("GOOGLE_OAUTH_ACCESS_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("GOOGLE_OAUTH_ACCESS_TOKEN must be set")?;

        let request_timeout_secs = match lookup("CLOUD_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid CLOUD_REQUEST_TIMEOUT_SECS: {}", raw))?,
            None => 30,
        };

        let summary_concurrent = match lookup("SUMMARY_CONCURRENT") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("Invalid SUMMARY_CONCURRENT: {}", raw))?,
            None => false,
        };

        Ok(Self {
            cloud: CloudConfig {
                resource_manager_url: base_url(
                    lookup("CLOUD_RESOURCE_MANAGER_URL"),
                    DEFAULT_RESOURCE_MANAGER_URL,
                ),
                service_usage_url: base_url(lookup("SERVICE_USAGE_URL"), DEFAULT_SERVICE_USAGE_URL),
                api_keys_url: base_url(lookup("API_KEYS_URL"), DEFAULT_API_KEYS_URL),
                access_token,
                api_key: lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty()),
                request_timeout_secs,
            },
            telemetry: TelemetryConfig {
                log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "text".to_string()),
            },
            summary_concurrent,
        })
    }
}

impl CloudConfig {
    /// Configuration pointing every API at the same base URL.
    pub fn with_base_url(base_url: &str, access_token: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            resource_manager_url: base_url.clone(),
            service_usage_url: base_url.clone(),
            api_keys_url: base_url,
            access_token: access_token.to_string(),
            api_key: None,
            request_timeout_secs: 30,
        }
    }
}

/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => anyhow::bail!("expected true/false, 1/0 or yes/no"),
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
