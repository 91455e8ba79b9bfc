//! World mutation events.
//!
//! A host translates each event it receives into one [`WorldEvent`]
//! variant, hands it to the adapter by `&mut`, and then reads the
//! suppression fields back:
//!
//! | Field | Meaning when set by the adapter |
//! |-------|---------------------------------|
//! | `cancelled` | Drop the mutation entirely |
//! | `new_current` | Apply this redstone power instead |
//! | `blocks` | Only destroy the blocks still listed |
//!
//! The adapter only ever sets flags. A `cancelled` flag already raised by
//! another listener is left as it was.

use plotward_types::{Actor, BlockPos, Location};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player breaking or placing one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockActionEvent {
    /// The block broken or placed.
    pub block: BlockPos,
    /// The player responsible.
    pub actor: Actor,
    /// Suppression flag.
    pub cancelled: bool,
}

/// A redstone power level change on one block.
///
/// Not cancellable; suppression restores the old power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedstoneEvent {
    /// The powered block.
    pub block: BlockPos,
    /// Power before the change (0-15).
    pub old_current: u8,
    /// Power after the change (0-15).
    pub new_current: u8,
}

/// What the player did with their hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractAction {
    /// Right-click on a block.
    RightClickBlock,
    /// Left-click on a block.
    LeftClickBlock,
    /// Right-click into the air.
    RightClickAir,
    /// Left-click into the air.
    LeftClickAir,
    /// Stepping on a pressure plate, trampling farmland.
    Physical,
}

/// A player clicking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractEvent {
    /// The player clicking.
    pub actor: Actor,
    /// Kind of click.
    pub action: InteractAction,
    /// The block clicked, if any.
    pub clicked: Option<BlockPos>,
    /// Suppression flag.
    pub cancelled: bool,
}

/// An explosion about to destroy blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionEvent {
    /// Where the explosion happened.
    pub origin: Location,
    /// Blocks the explosion will destroy. Protected entries are removed.
    pub blocks: Vec<BlockPos>,
    /// Suppression flag. Never set by the adapter.
    pub cancelled: bool,
}

/// A piston extending or retracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PistonEvent {
    /// The piston itself.
    pub piston: BlockPos,
    /// Every block the piston would move.
    pub moved: Vec<BlockPos>,
    /// Suppression flag.
    pub cancelled: bool,
}

/// Entity types the adapter distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Sand, gravel, concrete powder, anvils in flight.
    FallingBlock,
    /// Picks up and places blocks.
    Enderman,
    /// Breaks blocks it walks into.
    Wither,
    /// Anything else, by host name.
    Other(String),
}

/// An entity turning into, or changing, a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChangeBlockEvent {
    /// The block that would change.
    pub block: BlockPos,
    /// The entity causing it.
    pub entity: EntityType,
    /// Suppression flag.
    pub cancelled: bool,
}

/// A block changing on its own (growth, spread, form, fade).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockChangeEvent {
    /// The block that would change.
    pub block: BlockPos,
    /// Suppression flag.
    pub cancelled: bool,
}

/// Liquid flowing from one block into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEvent {
    /// Source block.
    pub from: BlockPos,
    /// Destination block. Only this one is checked.
    pub to: BlockPos,
    /// Suppression flag.
    pub cancelled: bool,
}

/// Why a creature is spawning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnReason {
    /// Regular world spawning.
    Natural,
    /// A mob spawner block.
    Spawner,
    /// Two animals breeding.
    Breeding,
    /// A spawn egg.
    SpawnEgg,
    /// Spawned programmatically by a plugin. Never blocked.
    Custom,
    /// Anything else, by host name.
    Other(String),
}

/// A creature about to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEvent {
    /// Spawn location.
    pub location: Location,
    /// Why it is spawning.
    pub reason: SpawnReason,
    /// Suppression flag.
    pub cancelled: bool,
}

/// One world mutation delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldEvent {
    /// Checked as `break_block`.
    BlockBreak(BlockActionEvent),
    /// Checked as `place_block`.
    BlockPlace(BlockActionEvent),
    /// Checked as `redstone`.
    RedstoneChange(RedstoneEvent),
    /// Checked as `container_access` or `interact`.
    PlayerInteract(InteractEvent),
    /// Checked as `entity_explosion`, per block.
    EntityExplosion(ExplosionEvent),
    /// Checked as `block_explosion`, per block.
    BlockExplosion(ExplosionEvent),
    /// Checked as `pistons`.
    PistonExtend(PistonEvent),
    /// Checked as `pistons`.
    PistonRetract(PistonEvent),
    /// Checked as `falling_block` when the entity is a falling block.
    EntityChangeBlock(EntityChangeBlockEvent),
    /// Checked as `growth`.
    CropGrow(BlockChangeEvent),
    /// Checked as `growth`.
    BlockSpread(BlockChangeEvent),
    /// Checked as `growth`.
    BlockForm(BlockChangeEvent),
    /// Checked as `fade`.
    BlockFade(BlockChangeEvent),
    /// Checked as `flow` on the destination.
    LiquidFlow(FlowEvent),
    /// Checked as `mob_spawn` unless the reason is custom.
    CreatureSpawn(SpawnEvent),
}

/// Fieldless tag for a [`WorldEvent`] variant, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    BlockBreak,
    BlockPlace,
    RedstoneChange,
    PlayerInteract,
    EntityExplosion,
    BlockExplosion,
    PistonExtend,
    PistonRetract,
    EntityChangeBlock,
    CropGrow,
    BlockSpread,
    BlockForm,
    BlockFade,
    LiquidFlow,
    CreatureSpawn,
}

impl EventKind {
    /// Returns the stable snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlockBreak => "block_break",
            Self::BlockPlace => "block_place",
            Self::RedstoneChange => "redstone_change",
            Self::PlayerInteract => "player_interact",
            Self::EntityExplosion => "entity_explosion",
            Self::BlockExplosion => "block_explosion",
            Self::PistonExtend => "piston_extend",
            Self::PistonRetract => "piston_retract",
            Self::EntityChangeBlock => "entity_change_block",
            Self::CropGrow => "crop_grow",
            Self::BlockSpread => "block_spread",
            Self::BlockForm => "block_form",
            Self::BlockFade => "block_fade",
            Self::LiquidFlow => "liquid_flow",
            Self::CreatureSpawn => "creature_spawn",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorldEvent {
    /// Returns the variant tag.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BlockBreak(_) => EventKind::BlockBreak,
            Self::BlockPlace(_) => EventKind::BlockPlace,
            Self::RedstoneChange(_) => EventKind::RedstoneChange,
            Self::PlayerInteract(_) => EventKind::PlayerInteract,
            Self::EntityExplosion(_) => EventKind::EntityExplosion,
            Self::BlockExplosion(_) => EventKind::BlockExplosion,
            Self::PistonExtend(_) => EventKind::PistonExtend,
            Self::PistonRetract(_) => EventKind::PistonRetract,
            Self::EntityChangeBlock(_) => EventKind::EntityChangeBlock,
            Self::CropGrow(_) => EventKind::CropGrow,
            Self::BlockSpread(_) => EventKind::BlockSpread,
            Self::BlockForm(_) => EventKind::BlockForm,
            Self::BlockFade(_) => EventKind::BlockFade,
            Self::LiquidFlow(_) => EventKind::LiquidFlow,
            Self::CreatureSpawn(_) => EventKind::CreatureSpawn,
        }
    }

    /// Returns the player responsible, if the event has one.
    #[must_use]
    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Self::BlockBreak(e) | Self::BlockPlace(e) => Some(&e.actor),
            Self::PlayerInteract(e) => Some(&e.actor),
            _ => None,
        }
    }

    /// Returns the suppression flag. Redstone changes have none and
    /// always return `false`.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::BlockBreak(e) | Self::BlockPlace(e) => e.cancelled,
            Self::RedstoneChange(_) => false,
            Self::PlayerInteract(e) => e.cancelled,
            Self::EntityExplosion(e) | Self::BlockExplosion(e) => e.cancelled,
            Self::PistonExtend(e) | Self::PistonRetract(e) => e.cancelled,
            Self::EntityChangeBlock(e) => e.cancelled,
            Self::CropGrow(e) | Self::BlockSpread(e) | Self::BlockForm(e) | Self::BlockFade(e) => {
                e.cancelled
            }
            Self::LiquidFlow(e) => e.cancelled,
            Self::CreatureSpawn(e) => e.cancelled,
        }
    }

    // ── Constructors ─────────────────────────────────────────

    /// A player breaking `block`.
    #[must_use]
    pub fn block_break(block: BlockPos, actor: Actor) -> Self {
        Self::BlockBreak(BlockActionEvent {
            block,
            actor,
            cancelled: false,
        })
    }

    /// A player placing `block`.
    #[must_use]
    pub fn block_place(block: BlockPos, actor: Actor) -> Self {
        Self::BlockPlace(BlockActionEvent {
            block,
            actor,
            cancelled: false,
        })
    }

    /// Redstone power on `block` changing from `old` to `new`.
    #[must_use]
    pub fn redstone_change(block: BlockPos, old: u8, new: u8) -> Self {
        Self::RedstoneChange(RedstoneEvent {
            block,
            old_current: old,
            new_current: new,
        })
    }

    /// A player clicking.
    #[must_use]
    pub fn interact(actor: Actor, action: InteractAction, clicked: Option<BlockPos>) -> Self {
        Self::PlayerInteract(InteractEvent {
            actor,
            action,
            clicked,
            cancelled: false,
        })
    }

    /// A player right-clicking `block`.
    #[must_use]
    pub fn right_click(actor: Actor, block: BlockPos) -> Self {
        Self::interact(actor, InteractAction::RightClickBlock, Some(block))
    }

    /// An entity (creeper, TNT) exploding at `origin`.
    #[must_use]
    pub fn entity_explosion(origin: Location, blocks: Vec<BlockPos>) -> Self {
        Self::EntityExplosion(ExplosionEvent {
            origin,
            blocks,
            cancelled: false,
        })
    }

    /// A block (bed, respawn anchor) exploding at `origin`.
    #[must_use]
    pub fn block_explosion(origin: Location, blocks: Vec<BlockPos>) -> Self {
        Self::BlockExplosion(ExplosionEvent {
            origin,
            blocks,
            cancelled: false,
        })
    }

    /// A piston at `piston` pushing `moved`.
    #[must_use]
    pub fn piston_extend(piston: BlockPos, moved: Vec<BlockPos>) -> Self {
        Self::PistonExtend(PistonEvent {
            piston,
            moved,
            cancelled: false,
        })
    }

    /// A piston at `piston` pulling `moved`.
    #[must_use]
    pub fn piston_retract(piston: BlockPos, moved: Vec<BlockPos>) -> Self {
        Self::PistonRetract(PistonEvent {
            piston,
            moved,
            cancelled: false,
        })
    }

    /// `entity` changing `block`.
    #[must_use]
    pub fn entity_change_block(block: BlockPos, entity: EntityType) -> Self {
        Self::EntityChangeBlock(EntityChangeBlockEvent {
            block,
            entity,
            cancelled: false,
        })
    }

    /// A crop growing at `block`.
    #[must_use]
    pub fn crop_grow(block: BlockPos) -> Self {
        Self::CropGrow(BlockChangeEvent::new(block))
    }

    /// Grass, mycelium, fire or vines spreading into `block`.
    #[must_use]
    pub fn block_spread(block: BlockPos) -> Self {
        Self::BlockSpread(BlockChangeEvent::new(block))
    }

    /// Snow, ice, obsidian or concrete forming at `block`.
    #[must_use]
    pub fn block_form(block: BlockPos) -> Self {
        Self::BlockForm(BlockChangeEvent::new(block))
    }

    /// Ice melting, leaves decaying, coral dying at `block`.
    #[must_use]
    pub fn block_fade(block: BlockPos) -> Self {
        Self::BlockFade(BlockChangeEvent::new(block))
    }

    /// Liquid flowing from `from` into `to`.
    #[must_use]
    pub fn liquid_flow(from: BlockPos, to: BlockPos) -> Self {
        Self::LiquidFlow(FlowEvent {
            from,
            to,
            cancelled: false,
        })
    }

    /// A creature spawning at `location`.
    #[must_use]
    pub fn creature_spawn(location: Location, reason: SpawnReason) -> Self {
        Self::CreatureSpawn(SpawnEvent {
            location,
            reason,
            cancelled: false,
        })
    }
}

impl BlockChangeEvent {
    fn new(block: BlockPos) -> Self {
        Self {
            block,
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> BlockPos {
        BlockPos::new("world", 1, 2, 3)
    }

    #[test]
    fn kind_names_are_snake_case() {
        let events = [
            WorldEvent::block_break(pos(), Actor::offline("a")),
            WorldEvent::redstone_change(pos(), 0, 15),
            WorldEvent::piston_retract(pos(), vec![]),
            WorldEvent::liquid_flow(pos(), pos().offset(1, 0, 0).expect("in range")),
        ];
        let names: Vec<_> = events.iter().map(|e| e.kind().as_str()).collect();
        assert_eq!(
            names,
            vec!["block_break", "redstone_change", "piston_retract", "liquid_flow"]
        );
    }

    #[test]
    fn kind_display_matches_as_str() {
        assert_eq!(EventKind::CreatureSpawn.to_string(), "creature_spawn");
    }

    #[test]
    fn actor_only_for_player_events() {
        let steve = Actor::offline("steve");
        assert_eq!(
            WorldEvent::block_place(pos(), steve.clone()).actor(),
            Some(&steve)
        );
        assert_eq!(
            WorldEvent::right_click(steve.clone(), pos()).actor(),
            Some(&steve)
        );
        assert_eq!(WorldEvent::crop_grow(pos()).actor(), None);
        assert_eq!(
            WorldEvent::entity_explosion(Location::new("world", 0.0, 0.0, 0.0), vec![]).actor(),
            None
        );
    }

    #[test]
    fn constructors_start_uncancelled() {
        assert!(!WorldEvent::block_fade(pos()).is_cancelled());
        assert!(!WorldEvent::redstone_change(pos(), 3, 0).is_cancelled());
        assert!(!WorldEvent::creature_spawn(
            Location::new("world", 0.5, 64.0, 0.5),
            SpawnReason::Natural
        )
        .is_cancelled());
    }

    #[test]
    fn is_cancelled_reads_flag() {
        let mut event = WorldEvent::block_form(pos());
        if let WorldEvent::BlockForm(e) = &mut event {
            e.cancelled = true;
        }
        assert!(event.is_cancelled());
    }

    #[test]
    fn serde_tagged_roundtrip() {
        let event = WorldEvent::entity_change_block(pos(), EntityType::FallingBlock);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "entity_change_block");
        assert_eq!(json["entity"], "falling_block");
        let restored: WorldEvent = serde_json::from_value(json).unwrap();
        assert_eq!(restored, event);
    }
}
