//! Unit tests for hive-store.

#[cfg(test)]
mod helpers {
    use hive_behavior::AgentMemory;
    use hive_core::AgentName;
    use crate::{Memory, MissionRecord};

    /// A memory with one mission owning `worker-0` and an orphan `worker-1`.
    pub fn memory() -> Memory {
        let mut m = Memory::new();
        let mut rec = MissionRecord::new("upgrade", "W1").with_spawn_source("Spawn1");
        rec.creeps.push(AgentName::new("worker-0"));
        m.missions.insert("upgrade-W1".into(), rec);
        m.agents.insert(AgentName::new("worker-0"), AgentMemory::new("worker", Some("upgrade-W1".into())));
        m.agents.insert(AgentName::new("worker-1"), AgentMemory::new("worker", None));
        m
    }
}

// ── MissionRecord ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod record {
    use std::collections::BTreeMap;
    use serde::{Deserialize, Serialize};
    use hive_core::AgentName;
    use crate::{MissionRecord, StoreError};

    #[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        source: u32,
        #[serde(default)]
        notes:  Vec<String>,
    }

    #[test]
    fn null_data_decodes_as_default() {
        let rec = MissionRecord::new("harvest", "W1");
        assert_eq!(rec.data::<Payload>("h").unwrap(), Payload::default());
    }

    #[test]
    fn typed_payload_round_trip() {
        let mut rec = MissionRecord::new("harvest", "W1");
        let p = Payload { source: 7, notes: vec!["far".into()] };
        rec.set_data("h", &p).unwrap();
        assert_eq!(rec.data["source"], 7);
        assert_eq!(rec.data::<Payload>("h").unwrap(), p);
    }

    #[test]
    fn mismatched_payload_names_the_mission() {
        let rec = MissionRecord::new("harvest", "W1").with_data("harvest-W1-0", &"not an object").unwrap();
        let err = rec.data::<Payload>("harvest-W1-0").unwrap_err();
        assert!(matches!(err, StoreError::MissionData { ref mission, .. } if mission == "harvest-W1-0"));
    }

    #[test]
    fn unserialisable_seed_payload_is_an_error() {
        // JSON object keys must be strings.
        let data: BTreeMap<(u8, u8), u8> = BTreeMap::from([((1, 2), 3)]);
        let err = MissionRecord::new("harvest", "W1").with_data("harvest-W1-0", &data).unwrap_err();
        assert!(matches!(err, StoreError::MissionData { ref mission, .. } if mission == "harvest-W1-0"));
    }

    #[test]
    fn head_count_includes_reservation() {
        let mut rec = MissionRecord::new("harvest", "W1");
        rec.creeps.push(AgentName::new("a"));
        assert_eq!(rec.head_count(), 1);
        rec.next_creep = Some(AgentName::new("b"));
        assert_eq!(rec.head_count(), 2);
    }

    #[test]
    fn persisted_field_names() {
        let mut rec = MissionRecord::new("build", "W1").with_spawn_source("Spawn1");
        rec.next_creep = Some(AgentName::new("worker-3"));
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["type"], "build");
        assert_eq!(v["next_creep"], "worker-3");
        assert_eq!(v["spawn_source"], "Spawn1");
        assert_eq!(v["colony"], "W1");
    }
}

// ── Memory ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use hive_core::Pos;
    use hive_spawn::{BodySpec, Need, SpawnRequest};
    use hive_world::GridWorld;
    use crate::Memory;
    use super::helpers::*;

    #[test]
    fn top_level_layout() {
        let mut m = memory();
        m.spawn_queue_mut("Spawn1");
        m.network_mut("W1");
        let v: serde_json::Value = serde_json::from_str(&m.to_json().unwrap()).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["agents", "missions", "networks", "spawns"]);
        assert_eq!(v["agents"]["worker-0"]["mission"], "upgrade-W1");
        assert!(v["networks"]["W1"]["requests"].is_object());
    }

    #[test]
    fn empty_document_is_empty_memory() {
        assert_eq!(Memory::from_json("{}").unwrap(), Memory::new());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let m = memory();
        m.save(&path).unwrap();
        assert_eq!(Memory::load(&path).unwrap(), m);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Memory::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::StoreError::Io(_)));
    }

    #[test]
    fn coordinators_are_created_once() {
        let mut m = Memory::new();
        m.spawn_queue_mut("Spawn1").cancel_mission("x");
        m.spawn_queue_mut("Spawn1");
        assert_eq!(m.spawns.len(), 1);
        assert_eq!(m.spawns["Spawn1"].facility(), "Spawn1");
    }

    #[test]
    fn release_orphans_mission_agents() {
        let mut m = memory();
        assert_eq!(m.release_agents("upgrade-W1"), 1);
        assert!(m.agents.values().all(|a| a.is_orphan()));
    }

    #[test]
    fn dead_agents_collected_unless_pending() {
        let mut w = GridWorld::new(50, 50);
        w.add_spawn("Spawn1", Pos::new(25, 25));
        w.add_agent("worker-0", Pos::new(5, 5), vec![hive_core::BodyPart::Move]).unwrap();
        let mut m = memory();

        // Queue a reservation and give it memory, as an orphan claim would.
        let req = SpawnRequest {
            priority: 1,
            body:     BodySpec::new("scout", vec![hive_core::BodyPart::Move]),
            mission:  "upgrade-W1".into(),
            need:     Need::Normal,
        };
        let mut agents = m.agents.clone();
        let name = m.spawn_queue_mut("Spawn1").request_creep(req, &w, &w, &mut agents).name().clone();
        m.agents.insert(name.clone(), hive_behavior::AgentMemory::new("scout", Some("upgrade-W1".into())));

        let dead = m.collect_dead_agents(&w);
        assert_eq!(dead, ["worker-1"]);
        assert!(m.agents.contains_key("worker-0"));
        assert!(m.agents.contains_key(name.as_str()));
    }
}
