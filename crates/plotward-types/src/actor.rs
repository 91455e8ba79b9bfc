//! Actor (player identity) types.
//!
//! An [`Actor`] is whoever caused a world event: the player breaking a
//! block, placing one, or right-clicking a chest. Natural processes
//! (growth, flow, explosions) have no actor at all, which the event
//! model expresses as `Option<Actor>` rather than a sentinel value.

use crate::ActorId;
use serde::{Deserialize, Serialize};

/// The player behind an event.
///
/// Carries identity only. Whether the actor may do something is
/// decided by bypass rules, never by the actor type itself.
///
/// # Example
///
/// ```
/// use plotward_types::{Actor, ActorId};
///
/// let admin = Actor::offline("admin");
/// assert_eq!(admin.name, "admin");
/// assert_eq!(admin.id, ActorId::offline("admin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identity.
    pub id: ActorId,
    /// Display name, as shown in chat.
    pub name: String,
}

impl Actor {
    /// Creates an actor from a host-provided ID and name.
    #[must_use]
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Creates an actor whose ID is derived from its name.
    #[must_use]
    pub fn offline(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ActorId::offline(&name),
            name,
        }
    }

    /// Case-insensitive name comparison, matching how servers treat
    /// player names.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.id.uuid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn offline_actor_is_deterministic() {
        let a = Actor::offline("Steve");
        let b = Actor::offline("Steve");
        assert_eq!(a, b);
    }

    #[test]
    fn host_id_is_kept() {
        let uuid = Uuid::new_v4();
        let actor = Actor::new(ActorId::from_uuid(uuid), "Alex");
        assert_eq!(actor.id.uuid(), uuid);
        assert_ne!(actor.id, ActorId::offline("Alex"));
    }

    #[test]
    fn is_named_ignores_case() {
        let actor = Actor::offline("Admin");
        assert!(actor.is_named("admin"));
        assert!(actor.is_named("ADMIN"));
        assert!(!actor.is_named("admins"));
    }

    #[test]
    fn display_contains_name_and_uuid() {
        let actor = Actor::offline("Steve");
        let shown = actor.to_string();
        assert!(shown.starts_with("Steve("));
        assert!(shown.contains(&actor.id.uuid().to_string()));
    }

    #[test]
    fn serde_roundtrip() {
        let actor = Actor::offline("Steve");
        let json = serde_json::to_string(&actor).expect("Actor should serialize to JSON");
        let restored: Actor =
            serde_json::from_str(&json).expect("Actor should deserialize from JSON");
        assert_eq!(restored, actor);
    }
}
