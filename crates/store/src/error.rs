//! Errors raised at the document-store boundary.

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store rejected the configured credentials (401/403).
    #[error("STORE_AUTH: {0}")]
    Auth(String),

    /// Non-success HTTP status from the store.
    #[error("STORE_HTTP: status {0}")]
    Status(u16),

    /// Transport-level failure (connect, TLS, body read).
    #[error("STORE_TRANSPORT: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout.
    #[error("STORE_TIMEOUT: {0}")]
    Timeout(String),

    /// The store's response did not decode into the expected shape.
    #[error("STORE_DECODE: {0}")]
    Decode(String),

    /// Client-side configuration problem (bad base URL, empty project id).
    #[error("STORE_CONFIG: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Status(503);
        assert!(err.to_string().contains("STORE_HTTP"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_auth_display() {
        let err = StoreError::Auth("token expired".into());
        assert!(err.to_string().contains("STORE_AUTH"));
    }
}
