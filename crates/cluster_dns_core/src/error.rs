use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("could not parse cluster name from clusterArn '{input}'")]
    Parse { input: String },

    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    #[error("{field} missing from {context}")]
    FieldMissing { field: String, context: String },

    #[error("orchestration service request failed: {0}")]
    Upstream(String),

    #[error("unrecognized event payload: {0}")]
    UnrecognizedPayload(String),
}

impl RoutingError {
    pub fn field_missing(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::FieldMissing {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Only upstream failures may be transient; everything else needs corrected input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}
