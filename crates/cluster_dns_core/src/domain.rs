use serde::Serialize;

use crate::error::RoutingError;

pub const HOSTED_ZONE_ID_TAG: &str = "hostedZoneId";
pub const DOMAIN_TAG: &str = "domain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDescriptor {
    pub cluster_name: String,
    pub cluster_arn: Option<String>,
    pub status: Option<String>,
}

/// Tag keys that carry the DNS routing configuration on a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagKeys {
    pub hosted_zone_id: String,
    pub domain: String,
}

impl Default for TagKeys {
    fn default() -> Self {
        Self {
            hosted_zone_id: HOSTED_ZONE_ID_TAG.to_string(),
            domain: DOMAIN_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub hosted_zone_id: String,
    pub domain: String,
}

impl DomainInfo {
    /// Scans cluster tags for routing configuration; a repeated key keeps its last value.
    ///
    /// Only the domain is required. A missing hosted zone yields an empty
    /// `hosted_zone_id`, leaving zone resolution to whoever consumes the result.
    pub fn from_tags(
        tags: &[ResourceTag],
        keys: &TagKeys,
        cluster_arn: &str,
    ) -> Result<Self, RoutingError> {
        let mut info = Self::default();
        for tag in tags {
            if tag.key == keys.hosted_zone_id {
                info.hosted_zone_id = tag.value.clone();
            }
            if tag.key == keys.domain {
                info.domain = tag.value.clone();
            }
        }

        if info.domain.is_empty() {
            return Err(RoutingError::field_missing(
                format!("{} tag", keys.domain),
                format!("cluster {cluster_arn}"),
            ));
        }
        Ok(info)
    }

    /// False when the cluster carries no hosted-zone tag; callers must resolve the zone themselves.
    pub fn has_hosted_zone(&self) -> bool {
        !self.hosted_zone_id.is_empty()
    }
}
