//! Unified error types for mcp-dulce.
//!
//! One taxonomy for the whole server: VALIDATION, NOT_FOUND, UNAUTHORIZED,
//! INTERNAL. The cache never raises any of these; it only ever answers
//! "entry" or "absent". Errors originate at the store boundary or in
//! request validation and cross the protocol boundary as structured
//! payloads with stable codes.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the mcp-dulce server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-range input parameters.
    #[error("VALIDATION: {0}")]
    Validation(String),

    /// A referenced entity or resource does not exist.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// The document store rejected the configured credentials.
    #[error("UNAUTHORIZED: {0}")]
    Unauthorized(String),

    /// Unexpected fetch or compute failure.
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::Validation(msg) => (-32602, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::Unauthorized(msg) => (-32002, msg.clone()),
            Error::Internal(msg) => (-32000, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
