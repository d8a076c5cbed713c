use cluster_dns_core::attachments::{select_eni_details, AttachmentRecord, NETWORK_INTERFACE_ID};
use cluster_dns_core::attributes::AttributeMap;
use cluster_dns_core::domain::DomainInfo;
use cluster_dns_core::event::{decode_event, EventPayload, CLUSTER_ARN_FIELD};
use cluster_dns_core::identifier::parse_cluster_name;
use cluster_dns_core::RoutingError;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::cluster_directory::ClusterDirectory;
use crate::config::HandlerConfig;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub network_interface_id: String,
    pub attributes: AttributeMap,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoutingOutcome {
    pub cluster_name: String,
    pub cluster_arn: String,
    pub domain: DomainInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interface: Option<NetworkInterface>,
}

/// Resolves DNS routing for the cluster named by an ECS state-change event.
///
/// Any failure aborts the invocation; retries belong to whatever delivered the event.
pub fn handle_cluster_event(
    event: Value,
    config: &HandlerConfig,
    directory: &dyn ClusterDirectory,
) -> Result<RoutingOutcome, RoutingError> {
    let result = resolve_routing(event, config, directory);
    match &result {
        Ok(outcome) if !outcome.domain.has_hosted_zone() => warn!(
            cluster_name = %outcome.cluster_name,
            domain = %outcome.domain.domain,
            "cluster has no hosted zone tag"
        ),
        Ok(outcome) => info!(
            cluster_name = %outcome.cluster_name,
            cluster_arn = %outcome.cluster_arn,
            hosted_zone_id = %outcome.domain.hosted_zone_id,
            domain = %outcome.domain.domain,
            network_interface_id = outcome
                .network_interface
                .as_ref()
                .map(|eni| eni.network_interface_id.as_str()),
            "resolved cluster domain"
        ),
        Err(failure) => error!(
            error = %failure,
            retryable = failure.is_retryable(),
            "cluster event failed"
        ),
    }
    result
}

fn resolve_routing(
    event: Value,
    config: &HandlerConfig,
    directory: &dyn ClusterDirectory,
) -> Result<RoutingOutcome, RoutingError> {
    let event = decode_event(event)?;
    info!(
        event_id = event.id.as_deref(),
        detail_type = event.detail_type.as_deref(),
        region = event.region.as_deref(),
        "received cluster event"
    );

    let (cluster_arn, network_interface) = match event.payload {
        EventPayload::Cluster { cluster_arn } => (cluster_arn, None),
        // The cluster ARN drives the invocation; a task without an ENI (EC2 or
        // bridge networking) still resolves, just without a network interface.
        EventPayload::Attachments {
            cluster_arn: Some(cluster_arn),
            attachments,
        } => match select_network_interface(&attachments) {
            Ok(network_interface) => (cluster_arn, Some(network_interface)),
            Err(RoutingError::NotFound { .. }) => (cluster_arn, None),
            Err(failure) => return Err(failure),
        },
        EventPayload::Attachments {
            cluster_arn: None,
            attachments,
        } => {
            select_network_interface(&attachments)?;
            return Err(RoutingError::field_missing(CLUSTER_ARN_FIELD, "event detail"));
        }
    };

    let cluster_name = parse_cluster_name(&cluster_arn)?.to_string();
    let cluster = directory.describe_cluster(&cluster_name)?;
    let tagged_arn = cluster.cluster_arn.unwrap_or(cluster_arn);
    let tags = directory.list_resource_tags(&tagged_arn)?;
    let domain = DomainInfo::from_tags(&tags, &config.tag_keys, &tagged_arn)?;

    Ok(RoutingOutcome {
        cluster_name,
        cluster_arn: tagged_arn,
        domain,
        network_interface,
    })
}

fn select_network_interface(
    attachments: &[AttachmentRecord],
) -> Result<NetworkInterface, RoutingError> {
    let mut attributes = select_eni_details(attachments)?;
    let network_interface_id = attributes
        .remove(NETWORK_INTERFACE_ID)
        .ok_or_else(|| RoutingError::field_missing(NETWORK_INTERFACE_ID, "eni attachment details"))?;
    Ok(NetworkInterface {
        network_interface_id,
        attributes,
    })
}
