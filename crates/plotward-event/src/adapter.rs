//! Event adapter: applies one policy to one world event.
//!
//! Each [`WorldEvent`] variant maps to a protection type, the block(s)
//! to check, the actor (if any), and the side effect applied on denial:
//!
//! | Event | Protection | Blocks | On deny |
//! |-------|------------|--------|---------|
//! | `BlockBreak` | `break_block` | broken block | cancel, message |
//! | `BlockPlace` | `place_block` | placed block | cancel, message |
//! | `RedstoneChange` | `redstone` | block | revert power |
//! | `PlayerInteract` | `container_access` / `interact` | clicked block | cancel, message |
//! | `EntityExplosion` | `entity_explosion` | each affected block | filter list |
//! | `BlockExplosion` | `block_explosion` | each affected block | filter list |
//! | `PistonExtend` / `PistonRetract` | `pistons` | piston + moved blocks | cancel if any denied |
//! | `EntityChangeBlock` | `falling_block` | block (falling blocks only) | cancel |
//! | `CropGrow` / `BlockSpread` / `BlockForm` | `growth` | block | cancel |
//! | `BlockFade` | `fade` | block | cancel |
//! | `LiquidFlow` | `flow` | destination | cancel |
//! | `CreatureSpawn` | `mob_spawn` | spawn block (custom reason exempt) | cancel |
//!
//! Interactions are only considered for right-clicks on a block the
//! policy covers. An inventory block is checked as `container_access`;
//! otherwise the block must be interactable to be checked as `interact`.
//! Before that, a covered anvil is reset to undamaged when `anvil_break`
//! is active.

use crate::event::{EntityType, InteractAction, SpawnReason, WorldEvent};
use crate::{EventKind, Messenger, WorldView};
use plotward_policy::{ProtectionPolicy, ProtectionType, Verdict};
use plotward_types::{Actor, BlockPos};

/// What the adapter did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The policy does not apply: disabled, or a sub-case the policy
    /// never checks (left-click, plain terrain, custom spawn, ...).
    Ignored,
    /// Checked and allowed; the event is untouched.
    Allowed,
    /// Checked and denied; `cancelled` was set.
    Cancelled,
    /// Redstone denied; `new_current` was reset to `current`.
    Reverted {
        /// The power level restored.
        current: u8,
    },
    /// Explosion blocks removed from the affected list.
    Filtered {
        /// The protected blocks that were removed.
        removed: Vec<BlockPos>,
    },
}

impl Outcome {
    /// Returns `true` if the event was modified.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Reverted { .. } | Self::Filtered { .. }
        )
    }
}

/// Applies policies to events using the host's world and messenger.
///
/// # Example
///
/// ```
/// use plotward_event::testing::{MockWorld, RecordingMessenger};
/// use plotward_event::{EventAdapter, Outcome, WorldEvent};
/// use plotward_policy::{ProtectionPolicy, ProtectionSet, ProtectionType};
/// use plotward_types::{Actor, BlockPos, Cuboid};
///
/// let world = MockWorld::new();
/// let messenger = RecordingMessenger::new();
/// let adapter = EventAdapter::new(&world, &messenger);
///
/// let policy = ProtectionPolicy::new(
///     Cuboid::new("world", [0, 0, 0], [15, 255, 15]),
///     ProtectionSet::BREAK_BLOCK,
/// )
/// .with_deny_message(ProtectionType::BreakBlock, "Protected.");
///
/// let mut event = WorldEvent::block_break(BlockPos::new("world", 3, 64, 3), Actor::offline("guest"));
/// assert_eq!(adapter.handle(&policy, &mut event), Outcome::Cancelled);
/// assert!(event.is_cancelled());
/// assert_eq!(messenger.messages_for("guest"), vec!["Protected."]);
/// ```
pub struct EventAdapter<'a> {
    world: &'a dyn WorldView,
    messenger: &'a dyn Messenger,
}

impl<'a> EventAdapter<'a> {
    /// Creates an adapter over the host's collaborators.
    #[must_use]
    pub fn new(world: &'a dyn WorldView, messenger: &'a dyn Messenger) -> Self {
        Self { world, messenger }
    }

    /// Applies `policy` to `event`, mutating its suppression fields on
    /// denial.
    ///
    /// A disabled policy ignores every event.
    pub fn handle(&self, policy: &ProtectionPolicy, event: &mut WorldEvent) -> Outcome {
        if !policy.is_enabled() {
            return Outcome::Ignored;
        }
        let kind = event.kind();

        match event {
            WorldEvent::BlockBreak(e) => {
                let verdict = self.check(
                    policy,
                    kind,
                    ProtectionType::BreakBlock,
                    &e.block,
                    Some(&e.actor),
                );
                self.cancel_and_notify(verdict, &mut e.cancelled, &e.actor)
            }
            WorldEvent::BlockPlace(e) => {
                let verdict = self.check(
                    policy,
                    kind,
                    ProtectionType::PlaceBlock,
                    &e.block,
                    Some(&e.actor),
                );
                self.cancel_and_notify(verdict, &mut e.cancelled, &e.actor)
            }
            WorldEvent::RedstoneChange(e) => {
                let verdict = self.check(policy, kind, ProtectionType::Redstone, &e.block, None);
                if verdict.is_denied() {
                    e.new_current = e.old_current;
                    Outcome::Reverted {
                        current: e.old_current,
                    }
                } else {
                    Outcome::Allowed
                }
            }
            WorldEvent::PlayerInteract(e) => {
                if e.action != InteractAction::RightClickBlock {
                    return Outcome::Ignored;
                }
                let Some(block) = e.clicked.as_ref() else {
                    return Outcome::Ignored;
                };
                if !policy.covers(block) {
                    return Outcome::Ignored;
                }
                if self.world.is_anvil(block)
                    && policy.is_protected(ProtectionType::AnvilBreak, block)
                {
                    tracing::trace!(block = %block, "resetting anvil damage");
                    self.world.reset_anvil_damage(block);
                }
                let protection = if self.world.has_inventory(block) {
                    ProtectionType::ContainerAccess
                } else if self.world.is_interactable(block) {
                    ProtectionType::Interact
                } else {
                    return Outcome::Ignored;
                };
                let verdict = self.check(policy, kind, protection, block, Some(&e.actor));
                self.cancel_and_notify(verdict, &mut e.cancelled, &e.actor)
            }
            WorldEvent::EntityExplosion(e) => {
                self.filter(policy, kind, ProtectionType::EntityExplosion, &mut e.blocks)
            }
            WorldEvent::BlockExplosion(e) => {
                self.filter(policy, kind, ProtectionType::BlockExplosion, &mut e.blocks)
            }
            WorldEvent::PistonExtend(e) | WorldEvent::PistonRetract(e) => {
                let denied = std::iter::once(&e.piston)
                    .chain(e.moved.iter())
                    .any(|b| {
                        self.check(policy, kind, ProtectionType::Pistons, b, None)
                            .is_denied()
                    });
                Self::cancel_if(denied, &mut e.cancelled)
            }
            WorldEvent::EntityChangeBlock(e) => {
                if e.entity != EntityType::FallingBlock {
                    return Outcome::Ignored;
                }
                let verdict =
                    self.check(policy, kind, ProtectionType::FallingBlock, &e.block, None);
                Self::cancel_if(verdict.is_denied(), &mut e.cancelled)
            }
            WorldEvent::CropGrow(e) | WorldEvent::BlockSpread(e) | WorldEvent::BlockForm(e) => {
                let verdict = self.check(policy, kind, ProtectionType::Growth, &e.block, None);
                Self::cancel_if(verdict.is_denied(), &mut e.cancelled)
            }
            WorldEvent::BlockFade(e) => {
                let verdict = self.check(policy, kind, ProtectionType::Fade, &e.block, None);
                Self::cancel_if(verdict.is_denied(), &mut e.cancelled)
            }
            WorldEvent::LiquidFlow(e) => {
                let verdict = self.check(policy, kind, ProtectionType::Flow, &e.to, None);
                Self::cancel_if(verdict.is_denied(), &mut e.cancelled)
            }
            WorldEvent::CreatureSpawn(e) => {
                if e.reason == SpawnReason::Custom {
                    return Outcome::Ignored;
                }
                let Some(block) = e.location.block_pos() else {
                    tracing::trace!(location = %e.location, "spawn location has no block");
                    return Outcome::Ignored;
                };
                let verdict = self.check(policy, kind, ProtectionType::MobSpawn, &block, None);
                Self::cancel_if(verdict.is_denied(), &mut e.cancelled)
            }
        }
    }

    fn check(
        &self,
        policy: &ProtectionPolicy,
        kind: EventKind,
        protection: ProtectionType,
        block: &BlockPos,
        actor: Option<&Actor>,
    ) -> Verdict {
        let verdict = policy.evaluate(protection, block, actor);
        let actor_name = actor.map(|a| a.name.as_str());
        if verdict.is_denied() {
            tracing::debug!(
                protection = %protection,
                event = %kind,
                block = %block,
                actor = actor_name,
                "denied"
            );
        } else {
            tracing::trace!(
                protection = %protection,
                event = %kind,
                block = %block,
                actor = actor_name,
                "allowed"
            );
        }
        verdict
    }

    fn cancel_and_notify(
        &self,
        verdict: Verdict,
        cancelled: &mut bool,
        actor: &Actor,
    ) -> Outcome {
        match verdict {
            Verdict::Allow => Outcome::Allowed,
            Verdict::Deny { message } => {
                *cancelled = true;
                if let Some(text) = message {
                    self.messenger.send_message(actor, &text);
                }
                Outcome::Cancelled
            }
        }
    }

    fn cancel_if(denied: bool, cancelled: &mut bool) -> Outcome {
        if denied {
            *cancelled = true;
            Outcome::Cancelled
        } else {
            Outcome::Allowed
        }
    }

    fn filter(
        &self,
        policy: &ProtectionPolicy,
        kind: EventKind,
        protection: ProtectionType,
        blocks: &mut Vec<BlockPos>,
    ) -> Outcome {
        let mut removed = Vec::new();
        blocks.retain(|b| {
            let keep = self.check(policy, kind, protection, b, None).is_allowed();
            if !keep {
                removed.push(b.clone());
            }
            keep
        });
        if removed.is_empty() {
            Outcome::Allowed
        } else {
            Outcome::Filtered { removed }
        }
    }
}
