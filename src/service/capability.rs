//! Maps capability detection

use crate::cloud::CloudApi;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Services whose enablement means a project can use Maps.
pub const MAPS_SERVICE_IDS: &[&str] = &[
    "geocoding-backend.googleapis.com",
    "maps-backend.googleapis.com",
    "elevation-backend.googleapis.com",
    "timezone-backend.googleapis.com",
];

pub fn is_maps_service(service_id: &str) -> bool {
    MAPS_SERVICE_IDS.contains(&service_id)
}

/// Recover the bare service id from `<resource>/services/<service id>`.
///
/// Names not under `resource` fall back to whatever follows the last
/// `/services/` segment.
pub fn service_id<'a>(resource_id: &str, name: &'a str) -> &'a str {
    let prefix = format!("{}/services/", resource_id);
    name.strip_prefix(prefix.as_str())
        .or_else(|| name.rsplit_once("/services/").map(|(_, id)| id))
        .unwrap_or(name)
}

/// Checks whether a resource has any Maps API enabled
pub struct CapabilityChecker<A: CloudApi> {
    api: Arc<A>,
}

impl<A: CloudApi> CapabilityChecker<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// `resource_id` is prefixed with its collection, e.g. `projects/123`.
    pub async fn has_capability(&self, resource_id: &str) -> Result<bool> {
        let response = self.api.list_enabled_services(resource_id).await?;

        let enabled = response
            .services
            .iter()
            .map(|service| service_id(resource_id, &service.name))
            .any(is_maps_service);

        debug!(
            resource_id,
            services = response.services.len(),
            enabled,
            "Checked Maps capability"
        );
        Ok(enabled)
    }
}
