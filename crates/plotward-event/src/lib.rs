//! World events and policy dispatch for plotward.
//!
//! This crate connects the hosting server's event stream to
//! `plotward-policy`. The host converts each world mutation into a
//! [`WorldEvent`], passes it to a [`PolicyRegistry`] (or directly to an
//! [`EventAdapter`]), and honours whatever suppression the adapter wrote
//! back into the event.
//!
//! # Crate Architecture
//!
//! ```text
//! plotward-types  (ActorId, Actor, BlockPos, Cuboid)
//!     ↑
//! plotward-policy (ProtectionSet, ProtectionPolicy, Verdict)
//!     ↑
//! plotward-event  ◄── THIS CRATE
//! (WorldEvent, EventAdapter, PolicyRegistry, WorldView, Messenger)
//! ```
//!
//! # Dispatch Flow
//!
//! ```text
//! host event ──► WorldEvent ──► PolicyRegistry::dispatch
//!                                   │ (each policy, registration order)
//!                                   ▼
//!                             EventAdapter::handle
//!                                   │ enabled? → protection type, blocks, actor
//!                                   ▼
//!                          ProtectionPolicy::evaluate
//!                                   │ Deny
//!                                   ▼
//!             cancel / revert / filter  (+ Messenger for players)
//! ```
//!
//! # Collaborators
//!
//! | Trait | Provided by | Used for |
//! |-------|-------------|----------|
//! | [`WorldView`] | host | inventory, interactable and anvil queries |
//! | [`Messenger`] | host | delivering deny messages |
//!
//! Collaborator panics are not caught; they propagate to the host's
//! event loop.
//!
//! # Features
//!
//! - `test-utils`: exposes [`testing`] (`MockWorld`, `RecordingMessenger`)
//!   to downstream crates.

pub mod adapter;
pub mod event;
pub mod registry;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use adapter::{EventAdapter, Outcome};
pub use event::{
    BlockActionEvent, BlockChangeEvent, EntityChangeBlockEvent, EntityType, EventKind,
    ExplosionEvent, FlowEvent, InteractAction, InteractEvent, PistonEvent, RedstoneEvent,
    SpawnEvent, SpawnReason, WorldEvent,
};
pub use registry::{PolicyRegistry, SharedPolicyRegistry};
pub use world::{Messenger, NullMessenger, WorldView};
