//! `GridWorld`: an in-memory world implementing every consumed interface.
//!
//! Used as the host environment for tests and the demo binary.  It models
//! just enough of a real game world for the coordination layer to be
//! exercised end to end: terrain-weighted movement, regenerating sources,
//! stores, construction, repair, controller upgrades, a production facility
//! per spawn, agent ageing and per-room visibility.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over object positions answers
//! [`World::find_in_range`] with a nearest-first walk instead of a scan
//! over every object.  Entries are
//! inserted and removed together with the objects themselves.

use std::collections::{BTreeMap, HashSet};

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use hive_core::{
    AgentName, BodyPart, HARVEST_POWER, MAX_BODY_PARTS, ObjectId, Pos, ResourceKind, RoomCoord,
    Store, Tick, body_cost, spawn_ticks,
};

use crate::{
    Action, Agent, DijkstraPathFinder, ObjectKind, PathFinder, ResultCode, Spawner, Spawning,
    StructureKind, Terrain, World, WorldActions, WorldError, WorldObject, WorldResult,
};

/// Lifetime of a freshly produced agent, in ticks.
pub const AGENT_LIFETIME: u32 = 1_500;
/// Ticks between a source's first harvest and its refill.
pub const SOURCE_REGEN_TICKS: u64 = 300;
/// Build progress per `Work` part per tick (one energy each).
pub const BUILD_POWER: u32 = 5;
/// Hit points restored per `Work` part per tick.
pub const REPAIR_POWER: u32 = 100;
/// Hit points restored per energy spent on repair.
pub const REPAIR_HITS_PER_ENERGY: u32 = 100;

pub const SPAWN_ENERGY_CAPACITY: u32 = 300;
pub const EXTENSION_ENERGY_CAPACITY: u32 = 50;
pub const CONTAINER_CAPACITY: u32 = 2_000;
pub const STORAGE_CAPACITY: u32 = 1_000_000;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the spatial index: an `[x, y]` point with its object id.
#[derive(Clone, PartialEq, Debug)]
struct ObjectEntry {
    point: [i32; 2],
    id:    ObjectId,
}

impl RTreeObject for ObjectEntry {
    type Envelope = AABB<[i32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObjectEntry {
    /// Squared Euclidean distance in tile space.
    fn distance_2(&self, point: &[i32; 2]) -> i32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Controller progress needed to leave `level`.
fn controller_threshold(level: u8) -> u32 {
    200 * (level as u32).max(1).pow(2)
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// In-memory world over a single terrain grid.
pub struct GridWorld<P: PathFinder = DijkstraPathFinder> {
    tick:        Tick,
    terrain:     Terrain,
    objects:     BTreeMap<ObjectId, WorldObject>,
    agents:      BTreeMap<AgentName, Agent>,
    index:       RTree<ObjectEntry>,
    next_id:     u32,
    hidden:      HashSet<RoomCoord>,
    acted:       HashSet<AgentName>,
    moved:       HashSet<AgentName>,
    path_finder: P,
}

impl GridWorld<DijkstraPathFinder> {
    /// An empty all-plain world of `width × height` tiles at tick 0.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_path_finder(Terrain::new(width, height), DijkstraPathFinder)
    }
}

impl<P: PathFinder> GridWorld<P> {
    pub fn with_path_finder(terrain: Terrain, path_finder: P) -> Self {
        Self {
            tick: Tick::ZERO,
            terrain,
            objects: BTreeMap::new(),
            agents: BTreeMap::new(),
            index: RTree::new(),
            next_id: 0,
            hidden: HashSet::new(),
            acted: HashSet::new(),
            moved: HashSet::new(),
            path_finder,
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut Terrain {
        &mut self.terrain
    }

    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }

    fn alloc_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert_object(&mut self, pos: Pos, kind: ObjectKind, store: Store, hits: u32, hits_max: u32) -> ObjectId {
        let id = self.alloc_id();
        if kind.blocks_movement() {
            self.terrain.set_obstacle(pos, true);
        }
        if kind == ObjectKind::Road {
            self.terrain.set_road(pos, true);
        }
        self.index.insert(ObjectEntry { point: [pos.x, pos.y], id });
        self.objects.insert(id, WorldObject { id, pos, kind, store, hits, hits_max });
        id
    }

    /// Add a full energy source.
    pub fn add_source(&mut self, pos: Pos, capacity: u32) -> ObjectId {
        let store = Store::with_capacity(capacity).with(ResourceKind::Energy, capacity);
        self.insert_object(pos, ObjectKind::Source { capacity, regen_at: None }, store, 0, 0)
    }

    pub fn add_container(&mut self, pos: Pos) -> ObjectId {
        let (kind, store, hits, hits_max) = structure_parts(StructureKind::Container);
        self.insert_object(pos, kind, store, hits, hits_max)
    }

    pub fn add_storage(&mut self, pos: Pos) -> ObjectId {
        self.insert_object(pos, ObjectKind::Storage, Store::with_capacity(STORAGE_CAPACITY), 10_000, 10_000)
    }

    /// Add a spawn holding a full energy reserve.
    pub fn add_spawn(&mut self, name: &str, pos: Pos) -> ObjectId {
        let store = Store::with_capacity(SPAWN_ENERGY_CAPACITY)
            .with(ResourceKind::Energy, SPAWN_ENERGY_CAPACITY);
        let kind = ObjectKind::Spawn { name: name.to_owned(), spawning: None };
        self.insert_object(pos, kind, store, 5_000, 5_000)
    }

    pub fn add_extension(&mut self, pos: Pos) -> ObjectId {
        let (kind, store, hits, hits_max) = structure_parts(StructureKind::Extension);
        self.insert_object(pos, kind, store, hits, hits_max)
    }

    pub fn add_controller(&mut self, pos: Pos) -> ObjectId {
        self.insert_object(pos, ObjectKind::Controller { level: 1, progress: 0 }, Store::default(), 0, 0)
    }

    pub fn add_construction_site(&mut self, pos: Pos, builds: StructureKind, total: u32) -> ObjectId {
        let kind = ObjectKind::ConstructionSite { builds, progress: 0, total };
        self.insert_object(pos, kind, Store::default(), 0, 0)
    }

    pub fn add_road(&mut self, pos: Pos) -> ObjectId {
        let (kind, store, hits, hits_max) = structure_parts(StructureKind::Road);
        self.insert_object(pos, kind, store, hits, hits_max)
    }

    pub fn add_wall(&mut self, pos: Pos, hits: u32, hits_max: u32) -> ObjectId {
        self.insert_object(pos, ObjectKind::Wall, Store::default(), hits, hits_max)
    }

    pub fn add_pile(&mut self, pos: Pos, resource: ResourceKind, amount: u32) -> ObjectId {
        let store = Store::with_capacity(amount).with(resource, amount);
        self.insert_object(pos, ObjectKind::Pile, store, 0, 0)
    }

    /// Place a ready (non-spawning) agent.  Returns its body id.
    pub fn add_agent(&mut self, name: &str, pos: Pos, body: Vec<BodyPart>) -> WorldResult<ObjectId> {
        if self.agents.contains_key(name) {
            return Err(WorldError::NameTaken(AgentName::new(name)));
        }
        let id = self.alloc_id();
        let agent = Agent::new(id, AgentName::new(name), pos, body, AGENT_LIFETIME);
        self.agents.insert(agent.name.clone(), agent);
        Ok(id)
    }

    /// Overwrite the amount of `resource` held by an object, clamped to its
    /// capacity.
    pub fn set_resource(&mut self, id: ObjectId, resource: ResourceKind, amount: u32) -> WorldResult<()> {
        let obj = self.objects.get_mut(&id).ok_or(WorldError::ObjectNotFound(id))?;
        obj.store.set(resource, amount);
        Ok(())
    }

    /// Remove an object (destroyed structure, depleted pile, …).
    pub fn remove_object(&mut self, id: ObjectId) -> Option<WorldObject> {
        let obj = self.objects.remove(&id)?;
        self.index.remove(&ObjectEntry { point: [obj.pos.x, obj.pos.y], id });
        if obj.kind.blocks_movement() {
            self.terrain.set_obstacle(obj.pos, false);
        }
        if obj.kind == ObjectKind::Road {
            self.terrain.set_road(obj.pos, false);
        }
        Some(obj)
    }

    pub fn remove_agent(&mut self, name: &str) -> Option<Agent> {
        self.agents.remove(name)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.get_mut(&id)
    }

    pub fn agent_mut(&mut self, name: &str) -> Option<&mut Agent> {
        self.agents.get_mut(name)
    }

    /// Make a room unobservable: its objects stop resolving.
    pub fn hide_room(&mut self, room: RoomCoord) {
        self.hidden.insert(room);
    }

    pub fn reveal_room(&mut self, room: RoomCoord) {
        self.hidden.remove(&room);
    }

    /// Id of the spawn object called `name`.
    pub fn spawn_id(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .values()
            .find(|o| o.spawn_name() == Some(name))
            .map(|o| o.id)
    }

    // ── Tick advance ──────────────────────────────────────────────────────

    /// Advance the world by one tick: finish production, age agents,
    /// regenerate sources, and reset per-tick action limits.
    pub fn end_tick(&mut self) {
        let next = self.tick + 1;

        let mut finished: Vec<(AgentName, Pos)> = Vec::new();
        for obj in self.objects.values_mut() {
            if let ObjectKind::Spawn { spawning, .. } = &mut obj.kind {
                let done = spawning.as_mut().is_some_and(|s| {
                    s.remaining = s.remaining.saturating_sub(1);
                    s.remaining == 0
                });
                if done {
                    if let Some(s) = spawning.take() {
                        finished.push((s.name, obj.pos));
                    }
                }
            }
        }
        for (name, spawn_pos) in finished {
            let exit = self.free_tile_near(spawn_pos);
            if let Some(agent) = self.agents.get_mut(&name) {
                agent.spawning = false;
                agent.pos = exit;
            }
        }

        self.agents.retain(|_, a| {
            if a.spawning {
                return true;
            }
            a.ticks_to_live = a.ticks_to_live.saturating_sub(1);
            a.ticks_to_live > 0
        });

        for obj in self.objects.values_mut() {
            if let ObjectKind::Source { capacity, regen_at } = &mut obj.kind {
                if regen_at.is_some_and(|t| t <= next) {
                    *regen_at = None;
                    obj.store.set(ResourceKind::Energy, *capacity);
                }
            }
        }

        self.tick = next;
        self.acted.clear();
        self.moved.clear();
    }

    fn free_tile_near(&self, pos: Pos) -> Pos {
        pos.neighbors()
            .into_iter()
            .find(|&p| self.terrain.is_walkable(p) && !self.agents.values().any(|a| a.pos == p))
            .unwrap_or(pos)
    }

    fn visible_object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects
            .get(&id)
            .filter(|o| !self.hidden.contains(&o.pos.room()))
    }

    fn spawn_room(&self, facility: &str) -> Option<RoomCoord> {
        self.objects
            .values()
            .find(|o| o.spawn_name() == Some(facility))
            .map(|o| o.pos.room())
    }

    /// Spawns and extensions in the facility's room, spawns first.
    fn energy_structures(&self, facility: &str) -> Vec<ObjectId> {
        let Some(room) = self.spawn_room(facility) else { return vec![] };
        let mut ids: Vec<(u8, ObjectId)> = self
            .objects
            .values()
            .filter(|o| o.pos.room() == room)
            .filter_map(|o| match o.kind {
                ObjectKind::Spawn { .. } => Some((0, o.id)),
                ObjectKind::Extension => Some((1, o.id)),
                _ => None,
            })
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Put harvested energy somewhere: the agent's store first, then a
    /// container underneath, then a pile on the ground.
    fn deposit_overflow(&mut self, pos: Pos, amount: u32) {
        if amount == 0 {
            return;
        }
        let container = self
            .objects
            .values_mut()
            .find(|o| o.pos == pos && o.kind == ObjectKind::Container && !o.store.is_full());
        let left = match container {
            Some(c) => amount - c.store.add(ResourceKind::Energy, amount),
            None => amount,
        };
        if left == 0 {
            return;
        }
        let pile = self
            .objects
            .values_mut()
            .find(|o| o.pos == pos && o.kind == ObjectKind::Pile);
        match pile {
            Some(p) => {
                p.store.capacity += left;
                p.store.add(ResourceKind::Energy, left);
            }
            None => {
                self.add_pile(pos, ResourceKind::Energy, left);
            }
        }
    }

    fn complete_site(&mut self, site: ObjectId) {
        let Some(obj) = self.remove_object(site) else { return };
        if let ObjectKind::ConstructionSite { builds, .. } = obj.kind {
            let (kind, store, hits, hits_max) = structure_parts(builds);
            self.insert_object(obj.pos, kind, store, hits, hits_max);
        }
    }
}

/// Kind, store, and hit points of a freshly built structure.
fn structure_parts(kind: StructureKind) -> (ObjectKind, Store, u32, u32) {
    match kind {
        StructureKind::Container => {
            (ObjectKind::Container, Store::with_capacity(CONTAINER_CAPACITY), 250_000, 250_000)
        }
        StructureKind::Extension => {
            (ObjectKind::Extension, Store::with_capacity(EXTENSION_ENERGY_CAPACITY), 1_000, 1_000)
        }
        StructureKind::Road => (ObjectKind::Road, Store::default(), 5_000, 5_000),
        StructureKind::Wall => (ObjectKind::Wall, Store::default(), 1, 1_000_000),
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

impl<P: PathFinder> World for GridWorld<P> {
    fn tick(&self) -> Tick {
        self.tick
    }

    fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.visible_object(id)
    }

    fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    fn agents(&self) -> Vec<&Agent> {
        self.agents.values().collect()
    }

    fn is_visible(&self, room: RoomCoord) -> bool {
        !self.hidden.contains(&room)
    }

    fn path_length(&self, from: Pos, to: Pos, range: u32) -> Option<u32> {
        self.path_finder
            .search(&self.terrain, from, to, range)
            .ok()
            .map(|p| p.cost)
    }

    fn find_in_range(&self, pos: Pos, range: u32) -> Vec<ObjectId> {
        // A Chebyshev square of radius r fits inside the circle of squared
        // radius 2r².
        let r = range as i32;
        let limit = 2 * r * r;
        let query = [pos.x, pos.y];
        let mut ids: Vec<ObjectId> = self
            .index
            .nearest_neighbor_iter(&query)
            .take_while(|e| e.distance_2(&query) <= limit)
            .filter(|e| Pos::new(e.point[0], e.point[1]).in_range_to(pos, range))
            .map(|e| e.id)
            .filter(|&id| self.visible_object(id).is_some())
            .collect();
        ids.sort();
        ids
    }

    fn objects_in_room(&self, room: RoomCoord) -> Vec<&WorldObject> {
        if self.hidden.contains(&room) {
            return vec![];
        }
        self.objects.values().filter(|o| o.pos.room() == room).collect()
    }
}

// ── WorldActions ──────────────────────────────────────────────────────────────

impl<P: PathFinder> WorldActions for GridWorld<P> {
    fn as_world(&self) -> &dyn World {
        self
    }

    fn move_toward(&mut self, agent: &str, target: Pos, range: u32) -> ResultCode {
        let Some(a) = self.agents.get(agent) else { return ResultCode::InvalidTarget };
        if a.spawning || self.moved.contains(agent) {
            return ResultCode::Busy;
        }
        if a.pos.in_range_to(target, range) {
            return ResultCode::Ok;
        }
        if a.parts(BodyPart::Move) == 0 {
            return ResultCode::NoBodyPart;
        }
        let from = a.pos;
        let path = match self.path_finder.search(&self.terrain, from, target, range) {
            Ok(p) => p,
            Err(_) => return ResultCode::NoPath,
        };
        if let (Some(&next), Some(a)) = (path.steps.first(), self.agents.get_mut(agent)) {
            a.pos = next;
            self.moved.insert(a.name.clone());
        }
        ResultCode::Ok
    }

    fn perform(&mut self, agent: &str, action: Action) -> ResultCode {
        let Some(a) = self.agents.get(agent) else { return ResultCode::InvalidTarget };
        if a.spawning || self.acted.contains(agent) {
            return ResultCode::Busy;
        }
        let Some(target) = self.visible_object(action.target()) else {
            return ResultCode::InvalidTarget;
        };
        if !a.pos.in_range_to(target.pos, action.range()) {
            return ResultCode::NotInRange;
        }

        let work = a.parts(BodyPart::Work) as u32;
        let agent_pos = a.pos;
        let target_id = target.id;

        let code = match action {
            Action::Harvest(_) => {
                if !target.is_source() {
                    return ResultCode::InvalidTarget;
                }
                if work == 0 {
                    return ResultCode::NoBodyPart;
                }
                let Some(src) = self.objects.get_mut(&target_id) else { return ResultCode::InvalidTarget };
                let amount = (work * HARVEST_POWER).min(src.energy());
                if amount == 0 {
                    return ResultCode::NotEnoughResources;
                }
                src.store.remove(ResourceKind::Energy, amount);
                if let ObjectKind::Source { regen_at, .. } = &mut src.kind {
                    if regen_at.is_none() {
                        *regen_at = Some(self.tick + SOURCE_REGEN_TICKS);
                    }
                }
                let kept = match self.agents.get_mut(agent) {
                    Some(a) => a.store.add(ResourceKind::Energy, amount),
                    None => 0,
                };
                self.deposit_overflow(agent_pos, amount - kept);
                ResultCode::Ok
            }

            Action::Transfer { resource, amount, .. } => {
                if matches!(
                    target.kind,
                    ObjectKind::Source { .. } | ObjectKind::ConstructionSite { .. } | ObjectKind::Pile
                ) || target.store.capacity == 0
                {
                    return ResultCode::InvalidTarget;
                }
                let held = a.store.get(resource);
                if held == 0 {
                    return ResultCode::NotEnoughResources;
                }
                let free = target.store.free_capacity();
                if free == 0 {
                    return ResultCode::Full;
                }
                let moved = amount.unwrap_or(u32::MAX).min(held).min(free);
                if let Some(t) = self.objects.get_mut(&target_id) {
                    t.store.add(resource, moved);
                }
                if let Some(a) = self.agents.get_mut(agent) {
                    a.store.remove(resource, moved);
                }
                ResultCode::Ok
            }

            Action::Withdraw { resource, amount, .. } => {
                if !matches!(
                    target.kind,
                    ObjectKind::Container | ObjectKind::Storage | ObjectKind::Spawn { .. } | ObjectKind::Extension
                ) {
                    return ResultCode::InvalidTarget;
                }
                let available = target.store.get(resource);
                if available == 0 {
                    return ResultCode::NotEnoughResources;
                }
                let free = a.store.free_capacity();
                if free == 0 {
                    return ResultCode::Full;
                }
                let moved = amount.unwrap_or(u32::MAX).min(available).min(free);
                if let Some(t) = self.objects.get_mut(&target_id) {
                    t.store.remove(resource, moved);
                }
                if let Some(a) = self.agents.get_mut(agent) {
                    a.store.add(resource, moved);
                }
                ResultCode::Ok
            }

            Action::Pickup(_) => {
                if target.kind != ObjectKind::Pile {
                    return ResultCode::InvalidTarget;
                }
                if a.store.free_capacity() == 0 {
                    return ResultCode::Full;
                }
                let pile: Vec<(ResourceKind, u32)> = target.store.iter().collect();
                let mut emptied = false;
                if let Some(a) = self.agents.get_mut(agent) {
                    for (resource, held) in pile {
                        let moved = a.store.add(resource, held);
                        if let Some(p) = self.objects.get_mut(&target_id) {
                            p.store.remove(resource, moved);
                            emptied = p.store.is_empty();
                        }
                    }
                }
                if emptied {
                    self.remove_object(target_id);
                }
                ResultCode::Ok
            }

            Action::Build(_) => {
                let ObjectKind::ConstructionSite { progress, total, .. } = target.kind else {
                    return ResultCode::InvalidTarget;
                };
                if work == 0 {
                    return ResultCode::NoBodyPart;
                }
                let energy = a.energy();
                if energy == 0 {
                    return ResultCode::NotEnoughResources;
                }
                let spent = (work * BUILD_POWER).min(energy).min(total - progress);
                if let Some(a) = self.agents.get_mut(agent) {
                    a.store.remove(ResourceKind::Energy, spent);
                }
                let mut complete = false;
                if let Some(site) = self.objects.get_mut(&target_id) {
                    if let ObjectKind::ConstructionSite { progress, total, .. } = &mut site.kind {
                        *progress += spent;
                        complete = *progress >= *total;
                    }
                }
                if complete {
                    self.complete_site(target_id);
                }
                ResultCode::Ok
            }

            Action::Repair(_) => {
                if !target.needs_repair() {
                    return ResultCode::InvalidTarget;
                }
                if work == 0 {
                    return ResultCode::NoBodyPart;
                }
                let energy = a.energy();
                if energy == 0 {
                    return ResultCode::NotEnoughResources;
                }
                let missing = target.hits_max - target.hits;
                let restored = (work * REPAIR_POWER)
                    .min(energy * REPAIR_HITS_PER_ENERGY)
                    .min(missing);
                let cost = restored.div_ceil(REPAIR_HITS_PER_ENERGY);
                if let Some(a) = self.agents.get_mut(agent) {
                    a.store.remove(ResourceKind::Energy, cost);
                }
                if let Some(t) = self.objects.get_mut(&target_id) {
                    t.hits += restored;
                }
                ResultCode::Ok
            }

            Action::Upgrade(_) => {
                if !matches!(target.kind, ObjectKind::Controller { .. }) {
                    return ResultCode::InvalidTarget;
                }
                if work == 0 {
                    return ResultCode::NoBodyPart;
                }
                let spent = work.min(a.energy());
                if spent == 0 {
                    return ResultCode::NotEnoughResources;
                }
                if let Some(a) = self.agents.get_mut(agent) {
                    a.store.remove(ResourceKind::Energy, spent);
                }
                if let Some(c) = self.objects.get_mut(&target_id) {
                    if let ObjectKind::Controller { level, progress } = &mut c.kind {
                        *progress += spent;
                        if *progress >= controller_threshold(*level) {
                            *progress -= controller_threshold(*level);
                            *level += 1;
                        }
                    }
                }
                ResultCode::Ok
            }
        };

        if code.is_ok() {
            self.acted.insert(AgentName::new(agent));
        }
        code
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

impl<P: PathFinder> Spawner for GridWorld<P> {
    fn available_resource(&self, facility: &str) -> u32 {
        self.energy_structures(facility)
            .iter()
            .filter_map(|id| self.objects.get(id))
            .map(|o| o.energy())
            .sum()
    }

    fn resource_capacity(&self, facility: &str) -> u32 {
        self.energy_structures(facility)
            .iter()
            .filter_map(|id| self.objects.get(id))
            .map(|o| o.store.capacity)
            .sum()
    }

    fn is_busy(&self, facility: &str) -> bool {
        self.producing(facility).is_some()
    }

    fn producing(&self, facility: &str) -> Option<AgentName> {
        self.objects.values().find_map(|o| match &o.kind {
            ObjectKind::Spawn { name, spawning: Some(s) } if name == facility => Some(s.name.clone()),
            _ => None,
        })
    }

    fn commit_production(&mut self, facility: &str, body: &[BodyPart], name: &AgentName) -> ResultCode {
        let Some(spawn_id) = self.spawn_id(facility) else { return ResultCode::InvalidTarget };
        if self.is_busy(facility) {
            return ResultCode::Busy;
        }
        if body.is_empty() || body.len() > MAX_BODY_PARTS || self.agents.contains_key(name) {
            return ResultCode::InvalidTarget;
        }
        let mut cost = body_cost(body);
        if cost > self.available_resource(facility) {
            return ResultCode::NotEnoughResources;
        }

        for id in self.energy_structures(facility) {
            if cost == 0 {
                break;
            }
            if let Some(o) = self.objects.get_mut(&id) {
                cost -= o.store.remove(ResourceKind::Energy, cost);
            }
        }

        let id = self.alloc_id();
        let Some(spawn) = self.objects.get_mut(&spawn_id) else { return ResultCode::InvalidTarget };
        let mut agent = Agent::new(id, name.clone(), spawn.pos, body.to_vec(), AGENT_LIFETIME);
        agent.spawning = true;
        if let ObjectKind::Spawn { spawning, .. } = &mut spawn.kind {
            *spawning = Some(Spawning { name: name.clone(), remaining: spawn_ticks(body) });
        }
        self.agents.insert(name.clone(), agent);
        ResultCode::Ok
    }
}
