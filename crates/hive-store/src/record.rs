//! `MissionRecord`: everything a mission keeps between ticks.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use hive_core::AgentName;

use crate::{StoreError, StoreResult};

/// The persisted state of one mission or operation.
///
/// `data` is the kind-specific payload, kept as raw JSON here so the store
/// does not need to know every mission type.  [`MissionRecord::data`] and
/// [`MissionRecord::set_data`] convert it to and from the typed form.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MissionRecord {
    /// Type tag resolved by the mission factory.
    #[serde(rename = "type")]
    pub kind:         String,
    /// Confirmed live members.
    #[serde(default)]
    pub creeps:       Vec<AgentName>,
    /// The one outstanding reservation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_creep:   Option<AgentName>,
    /// Production facility this mission requests from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_source: Option<String>,
    pub colony:       String,
    #[serde(default)]
    pub data:         serde_json::Value,
}

impl MissionRecord {
    pub fn new(kind: impl Into<String>, colony: impl Into<String>) -> Self {
        Self {
            kind:         kind.into(),
            creeps:       Vec::new(),
            next_creep:   None,
            spawn_source: None,
            colony:       colony.into(),
            data:         serde_json::Value::Null,
        }
    }

    pub fn with_spawn_source(mut self, facility: impl Into<String>) -> Self {
        self.spawn_source = Some(facility.into());
        self
    }

    /// Seed the payload for the mission called `mission`.
    pub fn with_data<M: Serialize>(mut self, mission: &str, data: &M) -> StoreResult<Self> {
        self.set_data(mission, data)?;
        Ok(self)
    }

    /// Decode the payload.  A `Null` payload decodes as `M::default()`.
    pub fn data<M: DeserializeOwned + Default>(&self, mission: &str) -> StoreResult<M> {
        if self.data.is_null() {
            return Ok(M::default());
        }
        M::deserialize(&self.data).map_err(|source| StoreError::MissionData { mission: mission.to_owned(), source })
    }

    pub fn set_data<M: Serialize>(&mut self, mission: &str, data: &M) -> StoreResult<()> {
        self.data = serde_json::to_value(data)
            .map_err(|source| StoreError::MissionData { mission: mission.to_owned(), source })?;
        Ok(())
    }

    /// Members plus the pending reservation.
    pub fn head_count(&self) -> usize {
        self.creeps.len() + usize::from(self.next_creep.is_some())
    }
}
