//! Discovery pipeline services

pub mod capability;
pub mod keys;
pub mod project;

pub use capability::{CapabilityChecker, MAPS_SERVICE_IDS};
pub use keys::{normalize_key, rewrite_file_referrer, KeyService, RestrictionKind};
pub use project::{FetchMode, ProjectService};
