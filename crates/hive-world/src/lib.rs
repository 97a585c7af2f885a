//! `hive-world`: the world as the coordination layer sees it.
//!
//! The coordination layer never owns the world.  It talks to it through
//! three narrow traits defined in [`world`], so the same kernel can drive a
//! host environment binding or the in-memory [`GridWorld`] used by tests and
//! the demo.
//!
//! # What lives here
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`terrain`]    | `Terrain`, `TerrainKind`, per-tile movement cost      |
//! | [`pathfinder`] | `PathFinder` trait, `DijkstraPathFinder`, `Path`      |
//! | [`objects`]    | `WorldObject`, `ObjectKind`, `Agent`                  |
//! | [`actions`]    | `Action`, `ResultCode`                                |
//! | [`world`]      | `World`, `WorldActions`, `Spawner`                    |
//! | [`grid`]       | `GridWorld` in-memory implementation                  |
//! | [`error`]      | `WorldError`, `WorldResult`                           |

pub mod actions;
pub mod error;
pub mod grid;
pub mod objects;
pub mod pathfinder;
pub mod terrain;
pub mod world;


pub use actions::{Action, ResultCode};
pub use error::{WorldError, WorldResult};
pub use grid::{AGENT_LIFETIME, GridWorld, SOURCE_REGEN_TICKS};
pub use objects::{Agent, ObjectKind, Spawning, StructureKind, WorldObject};
pub use pathfinder::{DijkstraPathFinder, Path, PathFinder};
pub use terrain::{PLAIN_COST, ROAD_COST, SWAMP_COST, Terrain, TerrainKind};
pub use world::{Spawner, World, WorldActions};
