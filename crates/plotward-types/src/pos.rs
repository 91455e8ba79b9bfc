//! Block and free-floating positions.

use serde::{Deserialize, Serialize};

/// Position of a single block in a named world.
///
/// Block coordinates are integers; two events touching the same block
/// always carry equal `BlockPos` values.
///
/// # Example
///
/// ```
/// use plotward_types::BlockPos;
///
/// let pos = BlockPos::new("world", 10, 64, -3);
/// assert_eq!(pos.to_string(), "world:10,64,-3");
/// assert_eq!(pos.offset(0, 1, 0), Some(BlockPos::new("world", 10, 65, -3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// World (dimension) name.
    pub world: String,
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Creates a block position.
    #[must_use]
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Returns the position shifted by the given deltas, in the same world.
    ///
    /// `None` if any axis would leave the `i32` range.
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            world: self.world.clone(),
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{},{},{}", self.world, self.x, self.y, self.z)
    }
}

/// A continuous position, e.g. where a creature spawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// World (dimension) name.
    pub world: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Returns the block containing this location.
    ///
    /// Each axis is floored, so `-0.5` lands in block `-1`. `None` if an
    /// axis is NaN, infinite, or floors outside the `i32` range.
    ///
    /// # Example
    ///
    /// ```
    /// use plotward_types::{BlockPos, Location};
    ///
    /// let loc = Location::new("world", 1.7, 64.0, -0.5);
    /// assert_eq!(loc.block_pos(), Some(BlockPos::new("world", 1, 64, -1)));
    /// assert_eq!(Location::new("world", f64::NAN, 64.0, 0.0).block_pos(), None);
    /// ```
    #[must_use]
    pub fn block_pos(&self) -> Option<BlockPos> {
        Some(BlockPos {
            world: self.world.clone(),
            x: block_coord(self.x)?,
            y: block_coord(self.y)?,
            z: block_coord(self.z)?,
        })
    }
}

fn block_coord(v: f64) -> Option<i32> {
    let floored = v.floor();
    if floored.is_finite()
        && floored >= f64::from(i32::MIN)
        && floored <= f64::from(i32::MAX)
    {
        Some(floored as i32)
    } else {
        None
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:.2},{:.2},{:.2}",
            self.world, self.x, self.y, self.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_pos_equality_includes_world() {
        let a = BlockPos::new("world", 1, 2, 3);
        let b = BlockPos::new("world_nether", 1, 2, 3);
        assert_ne!(a, b);
        assert_eq!(a, BlockPos::new("world", 1, 2, 3));
    }

    #[test]
    fn offset_keeps_world() {
        let pos = BlockPos::new("end", 0, 0, 0).offset(-1, 2, 3);
        assert_eq!(pos, Some(BlockPos::new("end", -1, 2, 3)));
    }

    #[test]
    fn offset_past_world_edge_is_none() {
        let edge = BlockPos::new("world", i32::MAX, 0, i32::MIN);
        assert_eq!(edge.offset(1, 0, 0), None);
        assert_eq!(edge.offset(0, 0, -1), None);
        assert_eq!(
            edge.offset(-1, 0, 1),
            Some(BlockPos::new("world", i32::MAX - 1, 0, i32::MIN + 1))
        );
    }

    #[test]
    fn location_floors_negative_coordinates() {
        let loc = Location::new("world", -0.01, -64.5, 15.99);
        assert_eq!(loc.block_pos(), Some(BlockPos::new("world", -1, -65, 15)));
    }

    #[test]
    fn location_on_block_boundary() {
        let loc = Location::new("world", 3.0, 70.0, -2.0);
        assert_eq!(loc.block_pos(), Some(BlockPos::new("world", 3, 70, -2)));
    }

    #[test]
    fn non_finite_location_has_no_block() {
        assert_eq!(Location::new("w", f64::NAN, f64::NAN, f64::NAN).block_pos(), None);
        assert_eq!(Location::new("w", 0.0, f64::INFINITY, 0.0).block_pos(), None);
        assert_eq!(Location::new("w", 0.0, 0.0, f64::NEG_INFINITY).block_pos(), None);
    }

    #[test]
    fn location_outside_block_range_has_no_block() {
        assert_eq!(Location::new("w", 3.0e9, 0.0, 0.0).block_pos(), None);
        assert_eq!(
            Location::new("w", f64::from(i32::MIN), 0.0, 2_147_483_647.9).block_pos(),
            Some(BlockPos::new("w", i32::MIN, 0, i32::MAX))
        );
    }

    #[test]
    fn block_pos_display() {
        assert_eq!(BlockPos::new("w", -1, 0, 1).to_string(), "w:-1,0,1");
    }
}
