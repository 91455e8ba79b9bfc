//! Error types for name resolution.
//!
//! Evaluation is total and never fails; these errors only come from
//! turning names into protection types.

use plotward_types::ErrorCode;
use thiserror::Error;

/// Errors that can occur while resolving protection names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Name is neither a protection type nor a grouping.
    #[error("unknown protection: {0}")]
    UnknownProtection(String),
}

impl ErrorCode for PolicyError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownProtection(_) => "POLICY_UNKNOWN_PROTECTION",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
