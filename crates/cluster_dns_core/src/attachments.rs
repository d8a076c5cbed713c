use serde::Deserialize;
use serde_json::{Map, Value};

use crate::attributes::{flatten_attributes, lenient_string, AttributeMap, AttributeRecord};
use crate::error::RoutingError;

pub const ENI_ATTACHMENT_TYPE: &str = "eni";
pub const NETWORK_INTERFACE_ID: &str = "networkInterfaceId";

/// One entry of an ECS task's `attachments` list.
///
/// Only `type` is trusted up front. `details` stays raw JSON until the record
/// is selected, so malformed attachments of other types never fail decoding.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AttachmentRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttachmentRecord {
    /// Entries that are not JSON objects decode as an untyped record, which no
    /// selector ever matches.
    pub fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn is_eni(&self) -> bool {
        self.kind.as_deref() == Some(ENI_ATTACHMENT_TYPE)
    }

    pub fn detail_records(&self) -> Result<Vec<AttributeRecord>, RoutingError> {
        match &self.details {
            Value::Null => Ok(Vec::new()),
            Value::Array(entries) => Ok(entries.iter().map(AttributeRecord::from_json).collect()),
            _ => Err(RoutingError::field_missing("details", self.describe())),
        }
    }

    fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("attachment {id}"),
            None => "attachment".to_string(),
        }
    }
}

/// Flattened details of the first `eni` attachment, in list order.
pub fn select_eni_details(attachments: &[AttachmentRecord]) -> Result<AttributeMap, RoutingError> {
    let eni = attachments
        .iter()
        .find(|attachment| attachment.is_eni())
        .ok_or_else(|| RoutingError::NotFound {
            what: "attachment",
            key: format!("type={ENI_ATTACHMENT_TYPE}"),
        })?;
    Ok(flatten_attributes(&eni.detail_records()?))
}

pub fn select_network_interface_id(
    attachments: &[AttachmentRecord],
) -> Result<String, RoutingError> {
    let mut details = select_eni_details(attachments)?;
    details
        .remove(NETWORK_INTERFACE_ID)
        .ok_or_else(|| RoutingError::field_missing(NETWORK_INTERFACE_ID, "eni attachment details"))
}
