//! Evaluation results.

/// Result of evaluating one `(protection, block, actor)` request.
///
/// A denial carries the message to show the actor, if one is configured.
/// Delivering it is the caller's job: evaluation has no side effects.
///
/// # Example
///
/// ```
/// use plotward_policy::Verdict;
///
/// let v = Verdict::Allow;
/// assert!(v.is_allowed());
/// assert_eq!(v.status_str(), "allow");
///
/// let v = Verdict::Deny { message: Some("Protected".into()) };
/// assert!(v.is_denied());
/// assert_eq!(v.message(), Some("Protected"));
///
/// let v = Verdict::Deny { message: None };
/// assert_eq!(v.message(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The action may proceed.
    Allow,
    /// The action must be suppressed.
    Deny {
        /// Message for the actor, `None` to deny silently.
        message: Option<String>,
    },
}

impl Verdict {
    /// Returns `true` if the action may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns `true` if the action must be suppressed.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Returns the deny message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Deny { message } => message.as_deref(),
        }
    }

    /// Returns a short status string for logs.
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny { .. } => "deny",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_has_no_message() {
        assert_eq!(Verdict::Allow.message(), None);
        assert!(!Verdict::Allow.is_denied());
    }

    #[test]
    fn deny_status() {
        let v = Verdict::Deny { message: None };
        assert!(v.is_denied());
        assert!(!v.is_allowed());
        assert_eq!(v.status_str(), "deny");
    }
}
