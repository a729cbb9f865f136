//! Refresh cycle error taxonomy.

use thiserror::Error;

use crate::sink::SinkError;

/// Everything that can go wrong in one refresh cycle.
///
/// None of these escape the loop; each one becomes a log entry and a
/// backoff-governed retry.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Connection, DNS, timeout or non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read to the end.
    #[error("read error: {0}")]
    Read(String),

    /// Fetched bytes are not a well-formed JSON document.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The sink refused to activate the new document.
    #[error("apply error: {0}")]
    Apply(#[from] SinkError),
}

impl RefreshError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RefreshError::Transport(_) => "transport",
            RefreshError::Read(_) => "read",
            RefreshError::Parse(_) => "parse",
            RefreshError::Apply(_) => "apply",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RefreshError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport error: connection refused");
        assert_eq!(err.kind(), "transport");

        let parse = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = RefreshError::from(parse);
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().starts_with("parse error: "));
    }
}
