//! Protection rules for plotward.
//!
//! This crate decides whether one world mutation is allowed inside a
//! protected area. It has no knowledge of events; the `plotward-event`
//! crate maps host events onto it.
//!
//! # Decision Model
//!
//! ```text
//! Deny = Protections(WHAT) ∩ Membership(WHERE) ∖ Bypass(WHO)
//! ```
//!
//! | Layer | Type | Controls |
//! |-------|------|----------|
//! | [`ProtectionSet`] | Bitflags | Which kinds of mutation are guarded |
//! | [`Membership`] | Trait | Which blocks are guarded |
//! | [`BypassChain`] | Rule list | Who or what is exempt |
//! | [`MessageTable`] | Map | What a denied player is told |
//!
//! # Crate Architecture
//!
//! ```text
//! plotward-types  (ActorId, Actor, BlockPos, Cuboid)
//!     ↑
//! plotward-policy  ◄── THIS CRATE
//! (ProtectionSet, BypassChain, ProtectionPolicy, PoliciesConfig)
//!     ↑
//! plotward-event (WorldEvent, EventAdapter, PolicyRegistry)
//! ```
//!
//! # Example
//!
//! ```
//! use plotward_policy::{PoliciesConfig, ProtectionType};
//! use plotward_types::{Actor, BlockPos};
//!
//! let config = PoliciesConfig::from_toml_str(r#"
//! [[policies]]
//! id = "spawn"
//! exclude = ["natural"]
//! region = { world = "world", min = [-16, 0, -16], max = [16, 255, 16] }
//!
//! [policies.messages]
//! all = "Spawn is protected."
//!
//! [[policies.bypass]]
//! actors = ["admin"]
//! "#).unwrap();
//!
//! let spawn = config.policies[0].build_with_region().unwrap();
//! let block = BlockPos::new("world", 3, 64, -2);
//!
//! assert_eq!(
//!     spawn.evaluate(ProtectionType::BreakBlock, &block, Some(&Actor::offline("guest"))).message(),
//!     Some("Spawn is protected."),
//! );
//! assert!(spawn.evaluate(ProtectionType::Growth, &block, None).is_allowed());
//! assert!(spawn
//!     .evaluate(ProtectionType::BreakBlock, &block, Some(&Actor::offline("Admin")))
//!     .is_allowed());
//! ```

pub mod bypass;
pub mod config;
pub mod error;
pub mod message;
pub mod policy;
pub mod protection;
pub mod verdict;

pub use bypass::{BypassChain, BypassRule};
pub use config::{BypassDef, ConfigError, PoliciesConfig, PolicyDef, PolicyDefError};
pub use error::PolicyError;
pub use message::MessageTable;
pub use policy::{Membership, ProtectionPolicy};
pub use protection::{ProtectionSet, ProtectionType};
pub use verdict::Verdict;
