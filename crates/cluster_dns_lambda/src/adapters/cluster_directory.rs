use cluster_dns_core::domain::{ClusterDescriptor, ResourceTag};
use cluster_dns_core::RoutingError;

/// Read-only view of the orchestration service.
///
/// Implementations report an unknown cluster as [`RoutingError::NotFound`] and
/// transport or decoding failures as [`RoutingError::Upstream`].
pub trait ClusterDirectory {
    fn describe_cluster(&self, name: &str) -> Result<ClusterDescriptor, RoutingError>;

    fn list_resource_tags(&self, resource_arn: &str) -> Result<Vec<ResourceTag>, RoutingError>;
}
