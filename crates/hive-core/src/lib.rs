//! `hive-core`: foundational types for the hive coordination framework.
//!
//! This crate is a dependency of every other `hive-*` crate.  It has no
//! `hive-*` dependencies and minimal external ones (`rand` and `thiserror`,
//! plus optional `serde`/`serde_json`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `ObjectId`, `RequestId`, `AgentName`                     |
//! | [`pos`]      | `Pos`, `RoomCoord`, Chebyshev range helpers              |
//! | [`time`]     | `Tick`                                                   |
//! | [`resource`] | `ResourceKind`, `Store`                                  |
//! | [`body`]     | `BodyPart`, cost and production-time helpers             |
//! | [`config`]   | `HiveConfig`, `LogisticsConfig`, `AssignmentPolicy`      |
//! | [`rng`]      | `SimRng` (world generation only)                         |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types and     |
//! |         | JSON loading for `HiveConfig`.  Required by `hive-store`.  |

pub mod body;
pub mod config;
pub mod error;
pub mod ids;
pub mod pos;
pub mod resource;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use body::{
    BodyPart, CARRY_CAPACITY_PER_PART, HARVEST_POWER, MAX_BODY_PARTS, SPAWN_TICKS_PER_PART, body_cost,
    count_parts, spawn_ticks,
};
pub use config::{AssignmentPolicy, HiveConfig, LogisticsConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentName, ObjectId, RequestId};
pub use pos::{Pos, ROOM_SIZE, RoomCoord};
pub use resource::{ResourceKind, Store};
pub use rng::SimRng;
pub use time::Tick;
