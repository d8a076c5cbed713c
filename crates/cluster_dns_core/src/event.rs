//! Decoding of EventBridge ECS state-change events into a closed set of payload shapes.

use serde_json::{Map, Value};

use crate::attachments::AttachmentRecord;
use crate::error::RoutingError;

pub const CLUSTER_ARN_FIELD: &str = "clusterArn";
pub const ATTACHMENTS_FIELD: &str = "attachments";

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// A cluster-level notification carrying only the cluster ARN.
    Cluster { cluster_arn: String },
    /// A task-level notification carrying the task's attachment list. ECS task
    /// state changes also name their cluster, but the field is not guaranteed.
    Attachments {
        cluster_arn: Option<String>,
        attachments: Vec<AttachmentRecord>,
    },
}

impl EventPayload {
    pub fn cluster_arn(&self) -> Option<&str> {
        match self {
            Self::Cluster { cluster_arn } => Some(cluster_arn),
            Self::Attachments { cluster_arn, .. } => cluster_arn.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterEvent {
    pub id: Option<String>,
    pub source: Option<String>,
    pub detail_type: Option<String>,
    pub region: Option<String>,
    pub payload: EventPayload,
}

pub fn decode_event(event: Value) -> Result<ClusterEvent, RoutingError> {
    let Value::Object(mut envelope) = event else {
        return Err(RoutingError::UnrecognizedPayload(
            "event must be a JSON object".to_string(),
        ));
    };

    let detail = match envelope.remove("detail") {
        Some(detail) => normalize_detail(detail)?,
        None => {
            return Err(RoutingError::UnrecognizedPayload(
                "event has no detail".to_string(),
            ))
        }
    };

    Ok(ClusterEvent {
        id: string_field(&envelope, "id"),
        source: string_field(&envelope, "source"),
        detail_type: string_field(&envelope, "detail-type"),
        region: string_field(&envelope, "region"),
        payload: decode_payload(detail)?,
    })
}

/// Classifies an event `detail` object. An `attachments` array takes precedence
/// over a bare `clusterArn`, since task events carry both.
pub fn decode_payload(mut detail: Map<String, Value>) -> Result<EventPayload, RoutingError> {
    let cluster_arn = string_field(&detail, CLUSTER_ARN_FIELD);

    match detail.remove(ATTACHMENTS_FIELD) {
        Some(Value::Array(entries)) => {
            return Ok(EventPayload::Attachments {
                cluster_arn,
                attachments: entries.into_iter().map(AttachmentRecord::from_json).collect(),
            });
        }
        Some(other) => {
            return Err(RoutingError::UnrecognizedPayload(format!(
                "{ATTACHMENTS_FIELD} must be an array, got {}",
                json_kind(&other)
            )));
        }
        None => {}
    }

    match cluster_arn {
        Some(cluster_arn) => Ok(EventPayload::Cluster { cluster_arn }),
        None => Err(RoutingError::UnrecognizedPayload(format!(
            "detail carries neither a string {CLUSTER_ARN_FIELD} nor an {ATTACHMENTS_FIELD} array"
        ))),
    }
}

fn normalize_detail(detail: Value) -> Result<Map<String, Value>, RoutingError> {
    match detail {
        Value::Object(object) => Ok(object),
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(RoutingError::UnrecognizedPayload(format!(
                "detail must be a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(error) => Err(RoutingError::UnrecognizedPayload(format!(
                "malformed JSON detail: {error}"
            ))),
        },
        other => Err(RoutingError::UnrecognizedPayload(format!(
            "detail must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
