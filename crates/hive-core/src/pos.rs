//! Tile position type and range utilities.
//!
//! The world is one global tile grid.  Every `ROOM_SIZE × ROOM_SIZE` block
//! of tiles forms a *room*, which is the unit of visibility: an agent or
//! structure inside a room makes every tile of that room observable.

use std::fmt;

/// Side length of a room, in tiles.
pub const ROOM_SIZE: i32 = 50;

/// Coordinates of a room on the room grid (`x = tile_x / ROOM_SIZE`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomCoord {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for RoomCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R[{},{}]", self.x, self.y)
    }
}

/// A tile on the global grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the number of 8-directional steps between two
    /// tiles on open ground.
    #[inline]
    pub fn range_to(self, other: Pos) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }

    /// `true` if `other` is within `range` steps of `self`.
    #[inline]
    pub fn in_range_to(self, other: Pos, range: u32) -> bool {
        self.range_to(other) <= range
    }

    /// The room this tile belongs to.
    #[inline]
    pub fn room(self) -> RoomCoord {
        RoomCoord {
            x: self.x.div_euclid(ROOM_SIZE),
            y: self.y.div_euclid(ROOM_SIZE),
        }
    }

    /// The eight surrounding tiles, in clockwise order from north.
    pub fn neighbors(self) -> [Pos; 8] {
        const DIRS: [(i32, i32); 8] =
            [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1)];
        DIRS.map(|(dx, dy)| Pos::new(self.x + dx, self.y + dy))
    }

    /// One step from `self` toward `target` (diagonal when both axes differ).
    pub fn step_toward(self, target: Pos) -> Pos {
        Pos::new(
            self.x + (target.x - self.x).signum(),
            self.y + (target.y - self.y).signum(),
        )
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
