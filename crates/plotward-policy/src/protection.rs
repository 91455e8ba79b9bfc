//! Protection categories and category sets.
//!
//! A [`ProtectionType`] names one kind of world mutation a policy can
//! guard against. A [`ProtectionSet`] is a set of them, stored as
//! bitflags so the named groupings are compile-time constants and the
//! set algebra is a couple of bit operations.
//!
//! # Groupings
//!
//! | Constant | Members |
//! |----------|---------|
//! | [`DIRECT_PLAYERS`](ProtectionSet::DIRECT_PLAYERS) | break, place, interact, container access |
//! | [`INDIRECT_PLAYERS`](ProtectionSet::INDIRECT_PLAYERS) | pistons, redstone, entity/block explosions, falling blocks |
//! | [`NATURAL`](ProtectionSet::NATURAL) | growth, fade, flow, mob spawns |
//! | [`ALL`](ProtectionSet::ALL) | every protection type |
//!
//! Anvil damage belongs to no grouping; it is only covered by `ALL`
//! or by naming it explicitly.
//!
//! # Example
//!
//! ```
//! use plotward_policy::{ProtectionSet, ProtectionType};
//!
//! // Everything except mob spawning
//! let set = ProtectionSet::all_except(&[ProtectionType::MobSpawn]);
//! assert!(set.contains_type(ProtectionType::BreakBlock));
//! assert!(!set.contains_type(ProtectionType::MobSpawn));
//!
//! // Players may not touch anything, nature may not change anything
//! let set = ProtectionSet::union_of(&[ProtectionSet::DIRECT_PLAYERS, ProtectionSet::NATURAL]);
//! assert!(set.contains_type(ProtectionType::Flow));
//! assert!(!set.contains_type(ProtectionType::Pistons));
//! ```

use crate::PolicyError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One protectable action kind.
///
/// The enumeration is closed: hosts map their own event kinds onto
/// these, they never add new ones at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionType {
    /// Players breaking blocks.
    BreakBlock,
    /// Players placing blocks.
    PlaceBlock,
    /// Players interacting with non-container blocks (doors, levers, ...).
    Interact,
    /// Players opening containers.
    ContainerAccess,
    /// Entities exploding (creepers, TNT).
    EntityExplosion,
    /// Blocks exploding (beds in the nether, respawn anchors).
    BlockExplosion,
    /// Pistons pushing and pulling blocks.
    Pistons,
    /// Redstone wires and components changing signal.
    Redstone,
    /// Falling block entities turning into solid blocks (sand, gravel).
    FallingBlock,
    /// Crop growth and block spreading/formation.
    Growth,
    /// Blocks fading (ice melting, coral dying).
    Fade,
    /// Lava and water flowing.
    Flow,
    /// Players using an anvil damaging it.
    AnvilBreak,
    /// Mobs spawning.
    MobSpawn,
}

impl ProtectionType {
    /// Every protection type, in declaration order.
    pub const ALL: [ProtectionType; 14] = [
        Self::BreakBlock,
        Self::PlaceBlock,
        Self::Interact,
        Self::ContainerAccess,
        Self::EntityExplosion,
        Self::BlockExplosion,
        Self::Pistons,
        Self::Redstone,
        Self::FallingBlock,
        Self::Growth,
        Self::Fade,
        Self::Flow,
        Self::AnvilBreak,
        Self::MobSpawn,
    ];

    /// Returns the single-member set for this type.
    #[must_use]
    pub const fn flag(self) -> ProtectionSet {
        match self {
            Self::BreakBlock => ProtectionSet::BREAK_BLOCK,
            Self::PlaceBlock => ProtectionSet::PLACE_BLOCK,
            Self::Interact => ProtectionSet::INTERACT,
            Self::ContainerAccess => ProtectionSet::CONTAINER_ACCESS,
            Self::EntityExplosion => ProtectionSet::ENTITY_EXPLOSION,
            Self::BlockExplosion => ProtectionSet::BLOCK_EXPLOSION,
            Self::Pistons => ProtectionSet::PISTONS,
            Self::Redstone => ProtectionSet::REDSTONE,
            Self::FallingBlock => ProtectionSet::FALLING_BLOCK,
            Self::Growth => ProtectionSet::GROWTH,
            Self::Fade => ProtectionSet::FADE,
            Self::Flow => ProtectionSet::FLOW,
            Self::AnvilBreak => ProtectionSet::ANVIL_BREAK,
            Self::MobSpawn => ProtectionSet::MOB_SPAWN,
        }
    }

    /// Returns the canonical snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreakBlock => "break_block",
            Self::PlaceBlock => "place_block",
            Self::Interact => "interact",
            Self::ContainerAccess => "container_access",
            Self::EntityExplosion => "entity_explosion",
            Self::BlockExplosion => "block_explosion",
            Self::Pistons => "pistons",
            Self::Redstone => "redstone",
            Self::FallingBlock => "falling_block",
            Self::Growth => "growth",
            Self::Fade => "fade",
            Self::Flow => "flow",
            Self::AnvilBreak => "anvil_break",
            Self::MobSpawn => "mob_spawn",
        }
    }

    /// Returns `true` for actions a player performs by hand.
    ///
    /// Only these can ever carry an actor to message.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        ProtectionSet::DIRECT_PLAYERS.contains(self.flag())
    }
}

impl FromStr for ProtectionType {
    type Err = PolicyError;

    /// Parses a protection name, case-insensitively.
    ///
    /// Both `break_block` and `BREAK_BLOCK` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| PolicyError::UnknownProtection(s.to_string()))
    }
}

impl fmt::Display for ProtectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of [`ProtectionType`]s.
    ///
    /// Membership order is irrelevant and duplicates collapse, so the
    /// set algebra below never needs to deduplicate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ProtectionSet: u16 {
        /// [`ProtectionType::BreakBlock`]
        const BREAK_BLOCK      = 1 << 0;
        /// [`ProtectionType::PlaceBlock`]
        const PLACE_BLOCK      = 1 << 1;
        /// [`ProtectionType::Interact`]
        const INTERACT         = 1 << 2;
        /// [`ProtectionType::ContainerAccess`]
        const CONTAINER_ACCESS = 1 << 3;
        /// [`ProtectionType::EntityExplosion`]
        const ENTITY_EXPLOSION = 1 << 4;
        /// [`ProtectionType::BlockExplosion`]
        const BLOCK_EXPLOSION  = 1 << 5;
        /// [`ProtectionType::Pistons`]
        const PISTONS          = 1 << 6;
        /// [`ProtectionType::Redstone`]
        const REDSTONE         = 1 << 7;
        /// [`ProtectionType::FallingBlock`]
        const FALLING_BLOCK    = 1 << 8;
        /// [`ProtectionType::Growth`]
        const GROWTH           = 1 << 9;
        /// [`ProtectionType::Fade`]
        const FADE             = 1 << 10;
        /// [`ProtectionType::Flow`]
        const FLOW             = 1 << 11;
        /// [`ProtectionType::AnvilBreak`]
        const ANVIL_BREAK      = 1 << 12;
        /// [`ProtectionType::MobSpawn`]
        const MOB_SPAWN        = 1 << 13;
    }
}

impl ProtectionSet {
    /// Actions taken directly by players: breaking, placing, and
    /// interacting with blocks.
    pub const DIRECT_PLAYERS: Self = Self::BREAK_BLOCK
        .union(Self::PLACE_BLOCK)
        .union(Self::INTERACT)
        .union(Self::CONTAINER_ACCESS);

    /// Actions usually caused by players that affect blocks indirectly:
    /// pistons, redstone, explosions, and falling blocks.
    pub const INDIRECT_PLAYERS: Self = Self::PISTONS
        .union(Self::REDSTONE)
        .union(Self::ENTITY_EXPLOSION)
        .union(Self::BLOCK_EXPLOSION)
        .union(Self::FALLING_BLOCK);

    /// Natural processes not caused by players.
    pub const NATURAL: Self = Self::GROWTH
        .union(Self::FADE)
        .union(Self::FLOW)
        .union(Self::MOB_SPAWN);

    /// Every protection type.
    pub const ALL: Self = Self::DIRECT_PLAYERS
        .union(Self::INDIRECT_PLAYERS)
        .union(Self::NATURAL)
        .union(Self::ANVIL_BREAK);

    /// Builds a set from individual types.
    #[must_use]
    pub fn from_types(types: &[ProtectionType]) -> Self {
        types
            .iter()
            .fold(Self::empty(), |set, t| set.union(t.flag()))
    }

    /// Every protection type except those given.
    ///
    /// Pure: returns a new set and never touches its input.
    #[must_use]
    pub fn all_except(excluded: &[ProtectionType]) -> Self {
        Self::ALL.difference(Self::from_types(excluded))
    }

    /// Union of any number of sets.
    #[must_use]
    pub fn union_of(sets: &[Self]) -> Self {
        sets.iter().fold(Self::empty(), |acc, s| acc.union(*s))
    }

    /// Returns `true` if the set contains the given type.
    #[must_use]
    pub fn contains_type(&self, protection: ProtectionType) -> bool {
        self.contains(protection.flag())
    }

    /// Iterates the member types in declaration order.
    pub fn iter_types(&self) -> impl Iterator<Item = ProtectionType> + '_ {
        ProtectionType::ALL
            .iter()
            .copied()
            .filter(move |t| self.contains(t.flag()))
    }

    /// Returns the member names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_types().map(|t| t.as_str()).collect()
    }

    /// Parses a protection or grouping name (case-insensitive).
    ///
    /// Accepts any [`ProtectionType`] name plus the groups `all`,
    /// `direct_players`, `indirect_players` and `natural`.
    ///
    /// # Example
    ///
    /// ```
    /// use plotward_policy::ProtectionSet;
    ///
    /// assert_eq!(ProtectionSet::parse("natural"), Some(ProtectionSet::NATURAL));
    /// assert_eq!(ProtectionSet::parse("FLOW"), Some(ProtectionSet::FLOW));
    /// assert_eq!(ProtectionSet::parse("lava"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Some(Self::ALL),
            "direct_players" => Some(Self::DIRECT_PLAYERS),
            "indirect_players" => Some(Self::INDIRECT_PLAYERS),
            "natural" => Some(Self::NATURAL),
            other => other.parse::<ProtectionType>().ok().map(ProtectionType::flag),
        }
    }

    /// Parses a list of names into a combined set.
    ///
    /// Returns the combined set and the names that were not recognised;
    /// callers decide whether unknown names are fatal.
    #[must_use]
    pub fn parse_list<'a, S: AsRef<str>>(names: &'a [S]) -> (Self, Vec<&'a str>) {
        let mut set = Self::empty();
        let mut unknown = Vec::new();
        for name in names {
            match Self::parse(name.as_ref()) {
                Some(s) => set |= s,
                None => unknown.push(name.as_ref()),
            }
        }
        (set, unknown)
    }
}

impl From<ProtectionType> for ProtectionSet {
    fn from(protection: ProtectionType) -> Self {
        protection.flag()
    }
}

impl fmt::Display for ProtectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}
