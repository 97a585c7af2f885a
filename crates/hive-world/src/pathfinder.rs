//! Path finding trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `GridWorld` calls path finding through the [`PathFinder`] trait, so
//! applications can swap in A*, jump-point search or a cached cost matrix
//! without touching the rest of the framework.  The default
//! [`DijkstraPathFinder`] is sufficient for room-scale grids.
//!
//! # Cost units
//!
//! Costs are terrain-weighted steps: plain and road tiles cost 1, swamp
//! tiles cost 5.  A path's `cost` is therefore also the number of ticks an
//! unencumbered agent needs to walk it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use hive_core::Pos;

use crate::{Terrain, WorldError};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a path query: tiles to step onto in order, excluding the
/// start tile, plus the total terrain-weighted cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub steps: Vec<Pos>,
    pub cost:  u32,
}

impl Path {
    /// `true` if the start was already within range of the goal.
    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable path-finding engine.
pub trait PathFinder {
    /// Find the cheapest path from `from` to any tile within Chebyshev
    /// `range` of `to`.
    ///
    /// `from` already within range yields an empty path rather than an
    /// error.
    fn search(&self, terrain: &Terrain, from: Pos, to: Pos, range: u32) -> Result<Path, WorldError>;
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Standard Dijkstra over the 8-connected tile grid.
#[derive(Default, Clone, Copy, Debug)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn search(&self, terrain: &Terrain, from: Pos, to: Pos, range: u32) -> Result<Path, WorldError> {
        dijkstra(terrain, from, to, range)
    }
}

fn dijkstra(terrain: &Terrain, from: Pos, to: Pos, range: u32) -> Result<Path, WorldError> {
    if from.in_range_to(to, range) {
        return Ok(Path { steps: vec![], cost: 0 });
    }
    if !terrain.contains(from) {
        return Err(WorldError::OutOfBounds(from));
    }

    let mut dist: HashMap<Pos, u32> = HashMap::new();
    let mut prev: HashMap<Pos, Pos> = HashMap::new();
    dist.insert(from, 0);

    // Min-heap: (cost, pos).  Reverse turns BinaryHeap (max) into a min-heap;
    // the secondary key gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, Pos)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, pos))) = heap.pop() {
        if pos.in_range_to(to, range) {
            return Ok(reconstruct(&prev, from, pos, cost));
        }

        // Skip stale heap entries.
        if cost > dist.get(&pos).copied().unwrap_or(u32::MAX) {
            continue;
        }

        for next in pos.neighbors() {
            let Some(step) = terrain.cost(next) else { continue };
            let new_cost = cost.saturating_add(step);
            if new_cost < dist.get(&next).copied().unwrap_or(u32::MAX) {
                dist.insert(next, new_cost);
                prev.insert(next, pos);
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    Err(WorldError::NoPath { from, to })
}

fn reconstruct(prev: &HashMap<Pos, Pos>, from: Pos, goal: Pos, cost: u32) -> Path {
    let mut steps = Vec::new();
    let mut cur = goal;
    while cur != from {
        steps.push(cur);
        match prev.get(&cur) {
            Some(&p) => cur = p,
            None => break,
        }
    }
    steps.reverse();
    Path { steps, cost }
}
