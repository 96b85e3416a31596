//! Error taxonomy for analytics collection, encoding and template insertion.
//!
//! Extraction misses are not errors and never surface here. Everything in
//! this enum either indicates a broken environment (compression) or a
//! malformed input handed to one of the inspection helpers.

/// Analytics errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The compression primitive failed while encoding a plaintext buffer.
    /// Internal: not caused by user input.
    #[error("internal error: payload compression failed: {0}")]
    Compression(#[source] std::io::Error),

    #[error("malformed analytics payload: {0}")]
    MalformedPayload(String),

    #[error("invalid base64 in analytics payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate logical id in template: {0}")]
    DuplicateLogicalId(String),
}

impl AnalyticsError {
    /// Whether this error points at the environment rather than the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, AnalyticsError::Compression(_))
    }
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_error_is_internal() {
        let err = AnalyticsError::Compression(std::io::Error::new(
            std::io::ErrorKind::Other,
            "deflate stream closed",
        ));
        assert!(err.is_internal());
        assert!(err.to_string().contains("internal error"));
        assert!(err.to_string().contains("deflate stream closed"));
    }

    #[test]
    fn test_malformed_payload_is_not_internal() {
        let err = AnalyticsError::MalformedPayload("missing encoding tag".to_string());
        assert!(!err.is_internal());
        assert!(err.to_string().contains("missing encoding tag"));
    }

    #[test]
    fn test_duplicate_logical_id_display() {
        let err = AnalyticsError::DuplicateLogicalId("CDKMetadata".to_string());
        assert!(err.to_string().contains("CDKMetadata"));
    }
}
