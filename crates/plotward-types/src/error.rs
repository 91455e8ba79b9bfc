//! Machine-readable error codes shared by plotward crates.
//!
//! Policy evaluation itself never fails. Errors only surface while
//! building policies from declarative configuration, and every such
//! error type implements [`ErrorCode`].

/// Stable code and recoverability for a plotward error.
///
/// Codes are `NAMESPACE_REASON` in upper snake case, where the
/// namespace names the crate layer that raised them: `POLICY_` for
/// name resolution, `CONFIG_` for policy files. A code never changes
/// once published, since hosts match on it when reporting a rejected
/// file.
///
/// # Example
///
/// ```
/// use plotward_types::ErrorCode;
///
/// enum RegionError {
///     EmptyWorld,
///     UnloadedWorld(String),
/// }
///
/// impl ErrorCode for RegionError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::EmptyWorld => "REGION_EMPTY_WORLD",
///             Self::UnloadedWorld(_) => "REGION_UNLOADED_WORLD",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         // The world may finish loading.
///         matches!(self, Self::UnloadedWorld(_))
///     }
/// }
///
/// let err = RegionError::UnloadedWorld("nether".into());
/// assert!(err.in_namespace("REGION"));
/// assert!(!err.in_namespace("CONFIG"));
/// assert!(err.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns the machine-readable code, e.g. `"CONFIG_PARSE"`.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying may succeed without editing the input.
    ///
    /// A malformed policy file is never recoverable.
    fn is_recoverable(&self) -> bool;

    /// Returns `true` if [`code`](Self::code) is `namespace` followed by
    /// `_` and a well-formed upper snake case reason.
    fn in_namespace(&self, namespace: &str) -> bool {
        self.code()
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(is_reason)
    }
}

/// `REASON` or `LONGER_REASON`: uppercase ASCII and digits, separated
/// by single underscores.
fn is_reason(s: &str) -> bool {
    !s.is_empty()
        && s.split('_').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
}
