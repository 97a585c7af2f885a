//! Plain data types for everything that exists in the world.

use hive_core::{
    AgentName, BodyPart, CARRY_CAPACITY_PER_PART, ObjectId, Pos, ResourceKind, Store, Tick,
    count_parts,
};

/// Structures a construction site can turn into.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StructureKind {
    Container,
    Extension,
    Road,
    Wall,
}

/// An agent being produced by a spawn.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Spawning {
    pub name:      AgentName,
    pub remaining: u64,
}

/// Discriminates world objects and carries kind-specific state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ObjectKind {
    /// Regenerating energy deposit.  `regen_at` is set by the first harvest
    /// after a refill.
    Source { capacity: u32, regen_at: Option<Tick> },
    Container,
    Storage,
    /// Production facility, addressed by name.
    Spawn { name: String, spawning: Option<Spawning> },
    Extension,
    Controller { level: u8, progress: u32 },
    ConstructionSite { builds: StructureKind, progress: u32, total: u32 },
    Road,
    Wall,
    /// Resources lying on the ground.
    Pile,
}

impl ObjectKind {
    /// `true` if agents cannot stand on the object's tile.
    pub fn blocks_movement(&self) -> bool {
        matches!(
            self,
            ObjectKind::Source { .. }
                | ObjectKind::Storage
                | ObjectKind::Spawn { .. }
                | ObjectKind::Extension
                | ObjectKind::Controller { .. }
                | ObjectKind::Wall
        )
    }

    /// `true` for structures that take repairs.
    pub fn is_repairable(&self) -> bool {
        matches!(self, ObjectKind::Container | ObjectKind::Road | ObjectKind::Wall)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Source { .. }           => "source",
            ObjectKind::Container               => "container",
            ObjectKind::Storage                 => "storage",
            ObjectKind::Spawn { .. }            => "spawn",
            ObjectKind::Extension               => "extension",
            ObjectKind::Controller { .. }       => "controller",
            ObjectKind::ConstructionSite { .. } => "construction_site",
            ObjectKind::Road                    => "road",
            ObjectKind::Wall                    => "wall",
            ObjectKind::Pile                    => "pile",
        }
    }
}

/// Any non-agent object.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WorldObject {
    pub id:       ObjectId,
    pub pos:      Pos,
    pub kind:     ObjectKind,
    pub store:    Store,
    pub hits:     u32,
    pub hits_max: u32,
}

impl WorldObject {
    /// Energy held by a source or store-bearing structure.
    pub fn energy(&self) -> u32 {
        self.store.get(ResourceKind::Energy)
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, ObjectKind::Source { .. })
    }

    pub fn needs_repair(&self) -> bool {
        self.kind.is_repairable() && self.hits < self.hits_max
    }

    /// Spawn name, for spawn objects.
    pub fn spawn_name(&self) -> Option<&str> {
        match &self.kind {
            ObjectKind::Spawn { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A live agent.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Agent {
    pub id:            ObjectId,
    pub name:          AgentName,
    pub pos:           Pos,
    pub body:          Vec<BodyPart>,
    pub store:         Store,
    pub ticks_to_live: u32,
    /// `true` while the agent is still being produced.  Spawning agents
    /// exist (their name resolves) but cannot move or act.
    pub spawning:      bool,
}

impl Agent {
    /// Build an agent whose carry capacity follows from its body.
    pub fn new(id: ObjectId, name: AgentName, pos: Pos, body: Vec<BodyPart>, ticks_to_live: u32) -> Self {
        let capacity = count_parts(&body, BodyPart::Carry) as u32 * CARRY_CAPACITY_PER_PART;
        Self {
            id,
            name,
            pos,
            body,
            store: Store::with_capacity(capacity),
            ticks_to_live,
            spawning: false,
        }
    }

    #[inline]
    pub fn parts(&self, part: BodyPart) -> usize {
        count_parts(&self.body, part)
    }

    pub fn energy(&self) -> u32 {
        self.store.get(ResourceKind::Energy)
    }
}
