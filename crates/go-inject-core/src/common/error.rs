//! Error types for the code generator.
//!
//! This module defines the central `Error` enum, which captures every failure
//! that stops a generation run. The plugin driver turns it into the `error`
//! field of the `CodeGeneratorResponse`, which is how protoc expects a plugin
//! to report problems.
//!
//! ## Error Cases
//! - `Decode`: The request bytes are not a valid `CodeGeneratorRequest`.
//! - `MalformedOptions`: A service's raw options could not be scanned.
//! - `InvalidParameter`: A plugin parameter is unknown or has a bad value.

use thiserror::Error;

/// Unified error type for the generator.
#[derive(Error, Debug)]
pub enum Error {
    /// The request failed protobuf decoding.
    #[error("Failed to decode request: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The wire bytes of a service's options are truncated or corrupt.
    #[error("Malformed options on service {service}: {reason}")]
    MalformedOptions { service: String, reason: String },

    /// A `key=value` plugin parameter was rejected.
    #[error("Invalid parameter `{key}`: {reason}")]
    InvalidParameter { key: String, reason: String },
}

impl Error {
    pub(crate) fn malformed(service: &str, reason: impl Into<String>) -> Self {
        Self::MalformedOptions {
            service: service.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
