//! Cuboid regions.
//!
//! A [`Cuboid`] is the ready-made membership test most policies use.
//! It is deliberately the only shape provided here: anything fancier is
//! expressed as a closure by the caller.

use crate::BlockPos;
use serde::{Deserialize, Serialize};

/// An axis-aligned box of blocks in one world, inclusive on both corners.
///
/// Corners may be given in any order; [`contains`](Self::contains)
/// normalises them, so a cuboid deserialized from hand-written config
/// behaves the same as one built with [`Cuboid::new`].
///
/// # Example
///
/// ```
/// use plotward_types::{BlockPos, Cuboid};
///
/// let spawn = Cuboid::new("world", [10, 0, 10], [-10, 255, -10]);
/// assert!(spawn.contains(&BlockPos::new("world", 0, 64, 0)));
/// assert!(spawn.contains(&BlockPos::new("world", -10, 0, 10)));
/// assert!(!spawn.contains(&BlockPos::new("world", 11, 64, 0)));
/// assert!(!spawn.contains(&BlockPos::new("world_nether", 0, 64, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cuboid {
    /// World the cuboid lives in.
    pub world: String,
    /// One corner, `[x, y, z]`.
    pub min: [i32; 3],
    /// The opposite corner, `[x, y, z]`.
    pub max: [i32; 3],
}

impl Cuboid {
    /// Creates a cuboid, sorting the corners so `min <= max` per axis.
    #[must_use]
    pub fn new(world: impl Into<String>, a: [i32; 3], b: [i32; 3]) -> Self {
        let (min, max) = normalise(a, b);
        Self {
            world: world.into(),
            min,
            max,
        }
    }

    /// Creates the cuboid spanned by two block positions.
    ///
    /// Returns `None` when the positions are in different worlds.
    #[must_use]
    pub fn between(a: &BlockPos, b: &BlockPos) -> Option<Self> {
        if a.world != b.world {
            return None;
        }
        Some(Self::new(a.world.clone(), [a.x, a.y, a.z], [b.x, b.y, b.z]))
    }

    /// Returns true if the block lies inside (inclusive min/max).
    #[must_use]
    pub fn contains(&self, pos: &BlockPos) -> bool {
        if pos.world != self.world {
            return false;
        }
        let (min, max) = normalise(self.min, self.max);
        (min[0]..=max[0]).contains(&pos.x)
            && (min[1]..=max[1]).contains(&pos.y)
            && (min[2]..=max[2]).contains(&pos.z)
    }

    /// Number of blocks in the cuboid, or `None` if it exceeds `u64`.
    #[must_use]
    pub fn volume(&self) -> Option<u64> {
        let (min, max) = normalise(self.min, self.max);
        (0..3)
            .map(|axis| (i64::from(max[axis]) - i64::from(min[axis])) as u64 + 1)
            .try_fold(1u64, u64::checked_mul)
    }
}

fn normalise(a: [i32; 3], b: [i32; 3]) -> ([i32; 3], [i32; 3]) {
    let mut min = [0; 3];
    let mut max = [0; 3];
    for axis in 0..3 {
        min[axis] = a[axis].min(b[axis]);
        max[axis] = a[axis].max(b[axis]);
    }
    (min, max)
}
