//! Identifier types for plotward.
//!
//! Identifiers are UUID-based so they survive serialization and match
//! the player identities handed over by the hosting server.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Namespace UUID for deterministic UUID v5 generation.
///
/// Used to derive stable actor identities from a player name when the
/// host has no account UUID to offer (offline mode, tests, fixtures).
const PLOTWARD_NAMESPACE: Uuid = uuid!("5b0c8f8e-3d4a-4f57-9a1e-6c2f0e7d9b31");

/// Identifier for an actor (a player) that triggers world events.
///
/// # UUID Strategy
///
/// - **Account actors**: Use the UUID supplied by the host
/// - **Offline actors**: Use UUID v5 derived from the player name
///
/// # Example
///
/// ```
/// use plotward_types::ActorId;
///
/// // Offline: deterministic UUID
/// let a1 = ActorId::offline("Steve");
/// let a2 = ActorId::offline("Steve");
/// assert_eq!(a1, a2);
///
/// // Different names never collide
/// assert_ne!(ActorId::offline("Steve"), ActorId::offline("Alex"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Wraps a host-provided account UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Creates an actor ID with a deterministic UUID v5.
    ///
    /// The UUID is derived from the plotward namespace UUID and the
    /// player name, so the same name always yields the same ID.
    #[must_use]
    pub fn offline(name: &str) -> Self {
        Self(Uuid::new_v5(
            &PLOTWARD_NAMESPACE,
            format!("actor:{name}").as_bytes(),
        ))
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Identifier for a protection policy registered with a registry.
///
/// Each registration gets a fresh random ID, so registering the same
/// policy definition twice yields two independent subscriptions.
///
/// # Example
///
/// ```
/// use plotward_types::PolicyId;
///
/// let a = PolicyId::new();
/// let b = PolicyId::new();
/// assert_ne!(a, b);
/// assert!(a.to_string().starts_with("policy:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub Uuid);

impl PolicyId {
    /// Creates a new [`PolicyId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "policy:{}", self.0)
    }
}
