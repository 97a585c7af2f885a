//! `hive-mission`: self-healing agent pools for the hive framework.
//!
//! A *mission* owns a pool of agents and a typed payload persisted in its
//! [`MissionRecord`][hive_store::MissionRecord].  Each tick it re-resolves
//! its world references, keeps its pool topped up through the spawn queue
//! (at most one outstanding reservation, replacements requested before the
//! current members age out) and assigns tasks to its members.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`mission`]  | `MissionPolicy`, `MissionHandle`, the generic `Mission<P>`     |
//! | [`context`]  | `MissionContext`, `Viability`                                  |
//! | [`kind`]     | `MissionKind`, `construct`, `init_mission`, `init_colony`      |
//! | [`missions`] | the concrete policies (colony, harvest, upgrade, build, logistics) |
//! | [`error`]    | `MissionError`, `MissionResult<T>`                             |

pub mod context;
pub mod error;
pub mod kind;
pub mod mission;
pub mod missions;

#[cfg(test)]
mod tests;

pub use context::{MissionContext, Viability};
pub use error::{MissionError, MissionResult};
pub use kind::{MissionKind, construct, init_colony, init_mission};
pub use mission::{Crew, Mission, MissionHandle, MissionPolicy, RollCall};
pub use missions::{
    BuildData, BuildMission, ColonyData, ColonyOperation, HarvestData, HarvestMission, LogisticsData,
    LogisticsMission, UpgradeData, UpgradeMission,
};
