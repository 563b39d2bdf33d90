use std::fmt;

use super::StatusCode;

/// Which half of the two-call topology query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    BufferSizes,
    Fetch,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStage::BufferSizes => f.write_str("sizing display config buffers"),
            QueryStage::Fetch => f.write_str("querying display config"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayConfigError {
    #[error("Failed {stage}: status {code}")]
    QueryFailed { stage: QueryStage, code: StatusCode },

    #[error("Invalid refresh rate: {input} (must be within 0-500 Hz)")]
    InvalidRate { input: String },

    #[error("Monitor not found: {token}")]
    NotFound { token: String },

    #[error("Monitor name '{token}' is ambiguous, matches paths {candidates:?}")]
    Ambiguous { token: String, candidates: Vec<usize> },

    #[error("Path index {index} is out of range ({path_count} active paths)")]
    InvalidPathIndex { index: usize, path_count: usize },

    #[error("Display configuration rejected: status {code}")]
    ApplyRejected { code: StatusCode },
}

impl DisplayConfigError {
    /// Stable identifier for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DisplayConfigError::QueryFailed { .. } => "QUERY_FAILED",
            DisplayConfigError::InvalidRate { .. } => "INVALID_RATE",
            DisplayConfigError::NotFound { .. } => "NOT_FOUND",
            DisplayConfigError::Ambiguous { .. } => "AMBIGUOUS",
            DisplayConfigError::InvalidPathIndex { .. } => "INVALID_PATH_INDEX",
            DisplayConfigError::ApplyRejected { .. } => "APPLY_REJECTED",
        }
    }

    /// Errors caused by operator input rather than the display subsystem
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DisplayConfigError::InvalidRate { .. }
                | DisplayConfigError::NotFound { .. }
                | DisplayConfigError::Ambiguous { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DisplayConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_rejected_keeps_code_verbatim() {
        let error = DisplayConfigError::ApplyRejected {
            code: StatusCode(87),
        };
        assert_eq!(
            error.to_string(),
            "Display configuration rejected: status 87 (0x00000057)"
        );
        assert_eq!(error.error_code(), "APPLY_REJECTED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_negative_code_is_shown_as_unsigned_hex() {
        let error = DisplayConfigError::QueryFailed {
            stage: QueryStage::Fetch,
            code: StatusCode(-1),
        };
        assert_eq!(
            error.to_string(),
            "Failed querying display config: status -1 (0xFFFFFFFF)"
        );
    }

    #[test]
    fn test_not_found_is_user_error() {
        let error = DisplayConfigError::NotFound {
            token: "dell".to_string(),
        };
        assert_eq!(error.to_string(), "Monitor not found: dell");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DisplayConfigError>();
    }
}
