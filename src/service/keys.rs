//! API key listing and restriction normalization

use crate::cloud::{ApiKey, CloudApi, KeyRestrictions};
use crate::domain::Key;
use crate::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Prefix the API Keys service uses for `file://` referrers.
const FILE_URL_MARKER: &str = "__file_url__/";
const FILE_URL_SCHEME: &str = "file://";

/// Kinds of key restriction, in the order their values appear in `Key::sites`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionKind {
    AndroidApplication,
    BrowserReferrer,
    IosBundleId,
}

impl RestrictionKind {
    pub const ORDER: [RestrictionKind; 3] = [
        RestrictionKind::AndroidApplication,
        RestrictionKind::BrowserReferrer,
        RestrictionKind::IosBundleId,
    ];

    /// Restriction values of this kind, in source order.
    pub fn values(self, restrictions: &KeyRestrictions) -> Vec<String> {
        match self {
            RestrictionKind::AndroidApplication => restrictions
                .android_key_restrictions
                .iter()
                .flat_map(|r| &r.allowed_applications)
                .filter_map(|app| app.package_name.clone())
                .collect(),
            RestrictionKind::BrowserReferrer => restrictions
                .browser_key_restrictions
                .iter()
                .flat_map(|r| &r.allowed_referrers)
                .map(|referrer| rewrite_file_referrer(referrer))
                .collect(),
            RestrictionKind::IosBundleId => restrictions
                .ios_key_restrictions
                .iter()
                .flat_map(|r| r.allowed_bundle_ids.iter().cloned())
                .collect(),
        }
    }
}

/// Turn `__file_url__//path` into `file:///path`; other referrers pass through.
pub fn rewrite_file_referrer(referrer: &str) -> String {
    match referrer.strip_prefix(FILE_URL_MARKER) {
        Some(rest) => format!("{}{}", FILE_URL_SCHEME, rest),
        None => referrer.to_string(),
    }
}

/// Flatten a raw key record into a [`Key`].
pub fn normalize_key(raw: &ApiKey) -> Key {
    let sites = match raw.restrictions {
        Some(ref restrictions) => RestrictionKind::ORDER
            .iter()
            .flat_map(|kind| kind.values(restrictions))
            .collect(),
        None => Vec::new(),
    };

    Key {
        name: raw.name.clone(),
        sites,
    }
}

/// Reads API keys for Maps projects
pub struct KeyService<A: CloudApi> {
    api: Arc<A>,
}

impl<A: CloudApi> KeyService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// List the keys of a project with their restrictions flattened.
    pub async fn list_keys(&self, project_number: &str) -> Result<Vec<Key>> {
        let parent = format!("projects/{}/locations/global", project_number);
        let response = self.api.list_keys(&parent).await?;

        let keys: Vec<Key> = response.keys.iter().map(normalize_key).collect();
        debug!(project_number, keys = keys.len(), "Listed API keys");
        Ok(keys)
    }

    /// Secret string of a key, looked up by its full resource name.
    pub async fn key_string(&self, key_name: &str) -> Result<String> {
        let response = self.api.get_key_string(key_name).await?;
        info!(key_name, "Fetched key string");

        response
            .key_string
            .ok_or_else(|| AppError::NotFound(format!("Key string for {} not found", key_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{
        AndroidApplication, AndroidKeyRestrictions, BrowserKeyRestrictions, IosKeyRestrictions,
        KeyStringResponse, ListKeysResponse, MockCloudApi,
    };
    use pretty_assertions::assert_eq;

    fn key(name: &str, restrictions: Option<KeyRestrictions>) -> ApiKey {
        ApiKey {
            name: name.to_string(),
            display_name: None,
            restrictions,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_rewrite_file_referrer() {
        assert_eq!(rewrite_file_referrer("__file_url__//path/to/"), "file:///path/to/");
        assert_eq!(
            rewrite_file_referrer("http://localhost:8080"),
            "http://localhost:8080"
        );
        // Marker only counts at the start.
        assert_eq!(
            rewrite_file_referrer("http://x.com/__file_url__//a"),
            "http://x.com/__file_url__//a"
        );
        assert_eq!(rewrite_file_referrer("__file_url__"), "__file_url__");
    }

    #[test]
    fn test_normalize_orders_kinds() {
        let raw = key(
            "projects/123/locations/global/keys/everything",
            Some(KeyRestrictions {
                android_key_restrictions: Some(AndroidKeyRestrictions {
                    allowed_applications: vec![AndroidApplication {
                        package_name: Some("com.my.android.package".to_string()),
                        sha1_fingerprint: None,
                    }],
                }),
                browser_key_restrictions: Some(BrowserKeyRestrictions {
                    allowed_referrers: strings(&["http://localhost:8080", "http://test.com/page"]),
                }),
                ios_key_restrictions: Some(IosKeyRestrictions {
                    allowed_bundle_ids: strings(&["com.my.ios.package"]),
                }),
            }),
        );

        assert_eq!(
            normalize_key(&raw).sites,
            strings(&[
                "com.my.android.package",
                "http://localhost:8080",
                "http://test.com/page",
                "com.my.ios.package",
            ])
        );
    }

    #[test]
    fn test_normalize_skips_apps_without_package() {
        let raw = key(
            "k",
            Some(KeyRestrictions {
                android_key_restrictions: Some(AndroidKeyRestrictions {
                    allowed_applications: vec![
                        AndroidApplication {
                            package_name: None,
                            sha1_fingerprint: Some("DA:39".to_string()),
                        },
                        AndroidApplication {
                            package_name: Some("com.kept".to_string()),
                            sha1_fingerprint: None,
                        },
                    ],
                }),
                ..Default::default()
            }),
        );

        assert_eq!(normalize_key(&raw).sites, strings(&["com.kept"]));
    }

    #[test]
    fn test_normalize_without_restrictions() {
        assert!(normalize_key(&key("open", None)).sites.is_empty());
        assert!(normalize_key(&key("empty", Some(KeyRestrictions::default())))
            .sites
            .is_empty());
    }

    #[test]
    fn test_restriction_kind_order_is_fixed() {
        assert_eq!(
            RestrictionKind::ORDER,
            [
                RestrictionKind::AndroidApplication,
                RestrictionKind::BrowserReferrer,
                RestrictionKind::IosBundleId,
            ]
        );
    }

    #[tokio::test]
    async fn test_list_keys() {
        let mut mock = MockCloudApi::new();
        mock.expect_list_keys()
            .withf(|parent| parent == "projects/123/locations/global")
            .times(1)
            .returning(|_| {
                Ok(ListKeysResponse {
                    keys: vec![
                        key("projects/123/locations/global/keys/unrestricted-key", None),
                        key(
                            "projects/123/locations/global/keys/http-restrictions",
                            Some(KeyRestrictions {
                                browser_key_restrictions: Some(BrowserKeyRestrictions {
                                    allowed_referrers: strings(&[
                                        "http://localhost:8080",
                                        "http://test.com/page",
                                    ]),
                                }),
                                ..Default::default()
                            }),
                        ),
                        key(
                            "projects/123/locations/global/keys/ios-restrictions",
                            Some(KeyRestrictions {
                                ios_key_restrictions: Some(IosKeyRestrictions {
                                    allowed_bundle_ids: strings(&["com.my.ios.package"]),
                                }),
                                ..Default::default()
                            }),
                        ),
                    ],
                })
            });

        let service = KeyService::new(Arc::new(mock));
        let keys = service.list_keys("123").await.unwrap();

        assert_eq!(
            keys,
            vec![
                Key {
                    name: "projects/123/locations/global/keys/unrestricted-key".to_string(),
                    sites: vec![],
                },
                Key {
                    name: "projects/123/locations/global/keys/http-restrictions".to_string(),
                    sites: strings(&["http://localhost:8080", "http://test.com/page"]),
                },
                Key {
                    name: "projects/123/locations/global/keys/ios-restrictions".to_string(),
                    sites: strings(&["com.my.ios.package"]),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_keys_empty() {
        let mut mock = MockCloudApi::new();
        mock.expect_list_keys()
            .returning(|_| Ok(ListKeysResponse::default()));

        let service = KeyService::new(Arc::new(mock));
        assert!(service.list_keys("empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_keys_propagates_errors() {
        let mut mock = MockCloudApi::new();
        mock.expect_list_keys()
            .returning(|_| Err(AppError::CloudApi("boom".to_string())));

        let service = KeyService::new(Arc::new(mock));
        assert!(matches!(
            service.list_keys("123").await,
            Err(AppError::CloudApi(_))
        ));
    }

    #[tokio::test]
    async fn test_key_string() {
        let mut mock = MockCloudApi::new();
        mock.expect_get_key_string()
            .withf(|name| name == "projects/123/locations/global/keys/k1")
            .returning(|_| {
                Ok(KeyStringResponse {
                    key_string: Some("AIzaSyTest".to_string()),
                })
            });

        let service = KeyService::new(Arc::new(mock));
        assert_eq!(
            service
                .key_string("projects/123/locations/global/keys/k1")
                .await
                .unwrap(),
            "AIzaSyTest"
        );
    }

    #[tokio::test]
    async fn test_key_string_missing() {
        let mut mock = MockCloudApi::new();
        mock.expect_get_key_string()
            .returning(|_| Ok(KeyStringResponse::default()));

        let service = KeyService::new(Arc::new(mock));
        assert!(matches!(
            service.key_string("k").await,
            Err(AppError::NotFound(_))
        ));
    }
}
