use std::collections::HashMap;

use cluster_dns_core::domain::{ClusterDescriptor, ResourceTag};
use cluster_dns_core::RoutingError;
use cluster_dns_lambda::adapters::cluster_directory::ClusterDirectory;
use cluster_dns_lambda::config::HandlerConfig;
use cluster_dns_lambda::handlers::cluster_event::handle_cluster_event;
use serde_json::{json, Value};

const FARGATE_CLUSTER_ARN: &str = "arn:aws:ecs:us-west-2:123456789012:cluster/FargateCluster";

struct InMemoryDirectory {
    clusters: HashMap<String, ClusterDescriptor>,
    tags: HashMap<String, Vec<ResourceTag>>,
}

impl InMemoryDirectory {
    fn fargate() -> Self {
        Self {
            clusters: HashMap::from([(
                "FargateCluster".to_string(),
                ClusterDescriptor {
                    cluster_name: "FargateCluster".to_string(),
                    cluster_arn: Some(FARGATE_CLUSTER_ARN.to_string()),
                    status: Some("ACTIVE".to_string()),
                },
            )]),
            tags: HashMap::from([(
                FARGATE_CLUSTER_ARN.to_string(),
                vec![
                    ResourceTag::new("hostedZoneId", "Z1D633PJN98FT9"),
                    ResourceTag::new("domain", "fargate.example.com"),
                ],
            )]),
        }
    }
}

impl ClusterDirectory for InMemoryDirectory {
    fn describe_cluster(&self, name: &str) -> Result<ClusterDescriptor, RoutingError> {
        self.clusters
            .get(name)
            .cloned()
            .ok_or_else(|| RoutingError::NotFound {
                what: "cluster",
                key: name.to_string(),
            })
    }

    fn list_resource_tags(&self, resource_arn: &str) -> Result<Vec<ResourceTag>, RoutingError> {
        Ok(self.tags.get(resource_arn).cloned().unwrap_or_default())
    }
}

fn task_state_change_event() -> Value {
    serde_json::from_str(include_str!("fixtures/task_state_change.json"))
        .expect("fixture should be valid json")
}

#[test]
fn resolves_routing_for_fargate_task_state_change() {
    let outcome = handle_cluster_event(
        task_state_change_event(),
        &HandlerConfig::default(),
        &InMemoryDirectory::fargate(),
    )
    .expect("fixture event should resolve");

    let response = serde_json::to_value(&outcome).expect("outcome should serialize");
    assert_eq!(
        response,
        json!({
            "clusterName": "FargateCluster",
            "clusterArn": FARGATE_CLUSTER_ARN,
            "domain": {
                "hostedZoneId": "Z1D633PJN98FT9",
                "domain": "fargate.example.com"
            },
            "networkInterface": {
                "networkInterfaceId": "eni-d681f702",
                "attributes": {
                    "macAddress": "d2:6b:3d:96:1a:68",
                    "privateIPv4Address": "10.0.0.1",
                    "subnetId": "subnet-3afa42b0"
                }
            }
        })
    );
}

#[test]
fn accepts_detail_delivered_as_encoded_string() {
    let mut event = task_state_change_event();
    let detail = event["detail"].to_string();
    event["detail"] = Value::String(detail);

    let outcome = handle_cluster_event(
        event,
        &HandlerConfig::default(),
        &InMemoryDirectory::fargate(),
    )
    .expect("string detail should resolve");

    assert_eq!(outcome.cluster_name, "FargateCluster");
}

#[test]
fn untagged_cluster_is_rejected() {
    let mut directory = InMemoryDirectory::fargate();
    directory.tags.clear();

    let error = handle_cluster_event(
        task_state_change_event(),
        &HandlerConfig::default(),
        &directory,
    )
    .expect_err("cluster without domain tag should fail");

    assert_eq!(
        error.to_string(),
        format!("domain tag missing from cluster {FARGATE_CLUSTER_ARN}")
    );
    assert!(!error.is_retryable());
}

#[test]
fn cluster_missing_from_directory_is_not_found() {
    let mut event = task_state_change_event();
    event["detail"]["clusterArn"] =
        Value::from("arn:aws:ecs:us-west-2:123456789012:cluster/Retired");

    let error = handle_cluster_event(
        event,
        &HandlerConfig::default(),
        &InMemoryDirectory::fargate(),
    )
    .expect_err("unknown cluster should fail");

    assert_eq!(error.to_string(), "cluster not found: Retired");
}

#[test]
fn unrecognized_detail_shape_is_rejected() {
    let error = handle_cluster_event(
        json!({"source": "aws.ecs", "detail": {"taskArn": "arn:aws:ecs:task/x"}}),
        &HandlerConfig::default(),
        &InMemoryDirectory::fargate(),
    )
    .expect_err("unknown detail should fail");

    assert!(matches!(error, RoutingError::UnrecognizedPayload(_)));
}
