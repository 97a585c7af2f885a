//! The narrow interfaces through which the coordination layer sees the
//! world.
//!
//! Three traits, split by who needs them:
//!
//! - [`World`]: read-only resolution and spatial queries.  Missions and
//!   behavior validity checks only ever hold a `&dyn World`.
//! - [`WorldActions`]: movement and leaf work actions, used when a
//!   behavior runs.
//! - [`Spawner`]: the production facility, used only by the spawn queue.
//!
//! All three are object safe so the kernel can be driven by a host
//! environment binding or by the in-memory [`GridWorld`][crate::GridWorld].

use hive_core::{AgentName, BodyPart, ObjectId, Pos, RoomCoord, Tick};

use crate::{Action, Agent, ResultCode, WorldObject};

/// Read-only world resolution and spatial queries.
pub trait World {
    /// The current tick.
    fn tick(&self) -> Tick;

    /// Resolve a non-agent object by id.  `None` if it no longer exists or
    /// is not currently observable.
    fn object(&self, id: ObjectId) -> Option<&WorldObject>;

    /// Resolve a live agent by name (spawning agents included).
    fn agent(&self, name: &str) -> Option<&Agent>;

    /// Every live agent, in name order.
    fn agents(&self) -> Vec<&Agent>;

    /// `true` if the room is currently observable.
    fn is_visible(&self, room: RoomCoord) -> bool;

    /// Terrain-weighted path cost from `from` to any tile within `range`
    /// of `to`; `None` if unreachable.
    fn path_length(&self, from: Pos, to: Pos, range: u32) -> Option<u32>;

    /// Ids of all observable objects within Chebyshev `range` of `pos`.
    fn find_in_range(&self, pos: Pos, range: u32) -> Vec<ObjectId>;

    /// Every observable object in `room`.
    fn objects_in_room(&self, room: RoomCoord) -> Vec<&WorldObject>;

    /// Convenience: "in range" test between a position and an object.
    fn in_range(&self, pos: Pos, target: ObjectId, range: u32) -> bool {
        self.object(target).is_some_and(|o| pos.in_range_to(o.pos, range))
    }
}

/// Movement and leaf work actions.
pub trait WorldActions: World {
    /// This world as a read-only [`World`].
    fn as_world(&self) -> &dyn World;

    /// Move `agent` one step along a path toward `target`, stopping once
    /// within `range`.
    fn move_toward(&mut self, agent: &str, target: Pos, range: u32) -> ResultCode;

    /// Perform one work action.
    fn perform(&mut self, agent: &str, action: Action) -> ResultCode;
}

/// A single production facility.
pub trait Spawner {
    /// Energy the facility can spend right now.
    fn available_resource(&self, facility: &str) -> u32;

    /// Most energy the facility could ever hold (drives body sizing).
    fn resource_capacity(&self, facility: &str) -> u32;

    /// `true` while the facility is producing.
    fn is_busy(&self, facility: &str) -> bool;

    /// Name of the agent currently being produced, if any.
    fn producing(&self, facility: &str) -> Option<AgentName>;

    /// Start producing an agent with exactly `body` and `name`.
    fn commit_production(&mut self, facility: &str, body: &[BodyPart], name: &AgentName) -> ResultCode;
}
