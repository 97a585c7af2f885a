//! The closed set of mission types and the single factory that rebuilds
//! them from persisted records.

use serde::Serialize;

use hive_core::RoomCoord;
use hive_store::{Memory, MissionRecord, StoreResult};

use crate::missions::{
    BuildMission, ColonyData, ColonyOperation, HarvestMission, LogisticsMission, UpgradeMission,
};
use crate::{Mission, MissionError, MissionHandle, MissionResult};

/// Type tag of a mission record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MissionKind {
    /// Owns no agents; keeps the other missions of a colony alive and feeds
    /// its logistics network.
    Colony,
    Harvest,
    Upgrade,
    Build,
    Logistics,
}

impl MissionKind {
    pub const ALL: [MissionKind; 5] = [
        MissionKind::Colony,
        MissionKind::Harvest,
        MissionKind::Upgrade,
        MissionKind::Build,
        MissionKind::Logistics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MissionKind::Colony    => "colony",
            MissionKind::Harvest   => "harvest",
            MissionKind::Upgrade   => "upgrade",
            MissionKind::Build     => "build",
            MissionKind::Logistics => "logistics",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }

    /// Operations run before missions so the missions they create or feed
    /// see this tick's state.
    pub fn is_operation(self) -> bool {
        matches!(self, MissionKind::Colony)
    }
}

impl std::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rebuild the executable mission behind `record`.
pub fn construct(name: &str, record: &MissionRecord) -> MissionResult<Box<dyn MissionHandle>> {
    let kind = MissionKind::from_tag(&record.kind).ok_or_else(|| MissionError::UnknownKind(record.kind.clone()))?;
    let record = record.clone();
    Ok(match kind {
        MissionKind::Colony    => Box::new(Mission::load(name, record, ColonyOperation)?),
        MissionKind::Harvest   => Box::new(Mission::load(name, record, HarvestMission)?),
        MissionKind::Upgrade   => Box::new(Mission::load(name, record, UpgradeMission)?),
        MissionKind::Build     => Box::new(Mission::load(name, record, BuildMission)?),
        MissionKind::Logistics => Box::new(Mission::load(name, record, LogisticsMission)?),
    })
}

/// Create the record for `name` unless one already exists.  Returns `true`
/// if a record was created.  Nothing is inserted if `data` fails to
/// serialise.
pub fn init_mission<M: Serialize>(
    memory:       &mut Memory,
    name:         &str,
    kind:         MissionKind,
    colony:       &str,
    spawn_source: Option<&str>,
    data:         &M,
) -> StoreResult<bool> {
    if memory.missions.contains_key(name) {
        return Ok(false);
    }
    let mut record = MissionRecord::new(kind.as_str(), colony).with_data(name, data)?;
    record.spawn_source = spawn_source.map(str::to_owned);
    memory.missions.insert(name.to_owned(), record);
    tracing::info!(mission = name, %kind, colony, "mission created");
    Ok(true)
}

/// Create the colony operation for `colony` (room `room`, producing from
/// `spawn`).  Returns the operation's name.
pub fn init_colony(memory: &mut Memory, colony: &str, room: RoomCoord, spawn: &str) -> StoreResult<String> {
    let name = format!("colony-{colony}");
    let data = ColonyData { room, spawn: spawn.to_owned() };
    init_mission(memory, &name, MissionKind::Colony, colony, Some(spawn), &data)?;
    Ok(name)
}
