//! Tile terrain and the per-tile movement cost grid.
//!
//! # Data layout
//!
//! Terrain is a dense row-major `Vec<TerrainKind>` covering a
//! `width × height` rectangle whose top-left tile is `(0, 0)`.  Tile `(x, y)`
//! lives at index `y * width + x`, so neighbour lookups in the path finder's
//! inner loop are plain index arithmetic.
//!
//! Structures layered on top of the terrain change movement cost:
//! obstacles (spawns, walls, sources, …) make a tile impassable, roads make
//! any non-wall tile cost 1.

use std::collections::HashSet;

use hive_core::Pos;

/// Movement cost of a plain tile.
pub const PLAIN_COST: u32 = 1;
/// Movement cost of a swamp tile.
pub const SWAMP_COST: u32 = 5;
/// Movement cost of a tile with a road.
pub const ROAD_COST: u32 = 1;

/// Natural terrain of one tile.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TerrainKind {
    #[default]
    Plain,
    Swamp,
    Wall,
}

/// Dense terrain grid plus structure overlays.
#[derive(Clone, Debug)]
pub struct Terrain {
    width:     i32,
    height:    i32,
    tiles:     Vec<TerrainKind>,
    obstacles: HashSet<Pos>,
    roads:     HashSet<Pos>,
}

impl Terrain {
    /// An all-plain grid.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles:     vec![TerrainKind::Plain; len],
            obstacles: HashSet::new(),
            roads:     HashSet::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Natural terrain at `pos`; out-of-bounds tiles read as walls.
    pub fn kind(&self, pos: Pos) -> TerrainKind {
        if self.contains(pos) {
            self.tiles[self.index(pos)]
        } else {
            TerrainKind::Wall
        }
    }

    pub fn set(&mut self, pos: Pos, kind: TerrainKind) {
        if self.contains(pos) {
            let i = self.index(pos);
            self.tiles[i] = kind;
        }
    }

    /// Mark or clear a structure that blocks movement.
    pub fn set_obstacle(&mut self, pos: Pos, blocked: bool) {
        if blocked {
            self.obstacles.insert(pos);
        } else {
            self.obstacles.remove(&pos);
        }
    }

    /// Mark or clear a road.
    pub fn set_road(&mut self, pos: Pos, road: bool) {
        if road {
            self.roads.insert(pos);
        } else {
            self.roads.remove(&pos);
        }
    }

    /// `true` if an agent may stand on `pos`.
    #[inline]
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cost(pos).is_some()
    }

    /// Cost of stepping onto `pos`, or `None` if impassable.
    pub fn cost(&self, pos: Pos) -> Option<u32> {
        match self.kind(pos) {
            TerrainKind::Wall => None,
            _ if self.obstacles.contains(&pos) => None,
            _ if self.roads.contains(&pos) => Some(ROAD_COST),
            TerrainKind::Plain => Some(PLAIN_COST),
            TerrainKind::Swamp => Some(SWAMP_COST),
        }
    }
}
