use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toast tone '{0}'")]
pub struct UnknownToneError(pub String);

/// Why an API origin could not be derived from the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base url '{raw}': {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
    #[error("API base url '{raw}' has no tuple origin")]
    OpaqueOrigin { raw: String },
}
