//! Core types for plotward.
//!
//! This crate provides the identity and geometry types shared by the
//! policy engine and the event adapter.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  plotward-types  : ActorId, Actor, BlockPos, Cuboid ◄── HERE │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  plotward-policy : ProtectionSet, BypassChain, MessageTable, │
//! │                    ProtectionPolicy, PoliciesConfig          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  plotward-event  : WorldEvent, EventAdapter, PolicyRegistry  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The hosting server owns the real world model. These types are the
//! minimal snapshot of it that a protection decision needs.
//!
//! # Example
//!
//! ```
//! use plotward_types::{Actor, BlockPos, Cuboid, Location};
//!
//! let region = Cuboid::new("world", [0, 0, 0], [15, 255, 15]);
//! let spawn = Location::new("world", 8.5, 64.0, 8.5);
//!
//! assert_eq!(spawn.block_pos(), Some(BlockPos::new("world", 8, 64, 8)));
//! assert!(region.contains(&BlockPos::new("world", 8, 64, 8)));
//! assert!(!region.contains(&BlockPos::new("world", 16, 64, 8)));
//!
//! let steve = Actor::offline("Steve");
//! assert!(steve.is_named("steve"));
//! ```

mod actor;
mod error;
mod id;
mod pos;
mod region;

pub use actor::Actor;
pub use error::ErrorCode;
pub use id::{ActorId, PolicyId};
pub use pos::{BlockPos, Location};
pub use region::Cuboid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_offline_deterministic() {
        let id1 = ActorId::offline("Steve");
        let id2 = ActorId::offline("Steve");
        assert_eq!(id1, id2);
        assert_eq!(id1.uuid(), id2.uuid());
    }

    #[test]
    fn actor_id_offline_different_names() {
        assert_ne!(ActorId::offline("Steve"), ActorId::offline("Alex"));
    }

    #[test]
    fn actor_id_display() {
        let id = ActorId::offline("Steve");
        let display = format!("{id}");
        assert!(display.starts_with("actor:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn policy_id_uniqueness() {
        assert_ne!(PolicyId::new(), PolicyId::new());
    }

    #[test]
    fn policy_id_display() {
        let id = PolicyId::new();
        let display = format!("{id}");
        assert!(display.starts_with("policy:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn policy_id_serde_roundtrip() {
        let id = PolicyId::new();
        let json = serde_json::to_string(&id).expect("PolicyId should serialize to JSON");
        let restored: PolicyId =
            serde_json::from_str(&json).expect("PolicyId should deserialize from JSON");
        assert_eq!(id, restored);
    }
}
