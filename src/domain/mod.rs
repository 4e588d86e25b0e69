//! Domain models returned to callers of the pipeline

use serde::{Deserialize, Serialize};

/// A cloud project with the Maps capability enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Display name
    pub name: String,
    /// Numeric project identifier, kept as an opaque string
    pub number: String,
    /// Populated by the summary step; empty straight out of `list_projects`
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl Project {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            keys: Vec::new(),
        }
    }

    /// Resource name used by the Cloud APIs, e.g. `projects/123`.
    pub fn resource_name(&self) -> String {
        format!("projects/{}", self.number)
    }

    /// Every restriction of every key, in key order.
    pub fn sites(&self) -> Vec<&str> {
        self.keys
            .iter()
            .flat_map(|key| key.sites.iter().map(String::as_str))
            .collect()
    }
}

/// An API key and the places it may be used from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Fully-qualified key resource name
    pub name: String,
    /// Restriction values; empty means the key is unrestricted
    #[serde(default)]
    pub sites: Vec<String>,
}

impl Key {
    pub fn is_unrestricted(&self) -> bool {
        self.sites.is_empty()
    }
}
