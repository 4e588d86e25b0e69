//! mapskeys - Maps project and API key discovery
//!
//! Finds the Google Cloud projects visible to the caller that have a Maps API
//! enabled, then lists each project's API keys with their application,
//! referrer and bundle restrictions flattened into a single list.

pub mod cloud;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod telemetry;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
