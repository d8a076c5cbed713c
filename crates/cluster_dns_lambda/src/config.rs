use cluster_dns_core::domain::{TagKeys, DOMAIN_TAG, HOSTED_ZONE_ID_TAG};

pub const HOSTED_ZONE_TAG_ENV: &str = "CLUSTER_DNS_HOSTED_ZONE_TAG";
pub const DOMAIN_TAG_ENV: &str = "CLUSTER_DNS_DOMAIN_TAG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerConfig {
    pub tag_keys: TagKeys,
}

impl HandlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank overrides fall back to the default tag keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            tag_keys: TagKeys {
                hosted_zone_id: resolve(HOSTED_ZONE_TAG_ENV, HOSTED_ZONE_ID_TAG),
                domain: resolve(DOMAIN_TAG_ENV, DOMAIN_TAG),
            },
        }
    }
}
