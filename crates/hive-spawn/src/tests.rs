//! Unit tests for hive-spawn.

#[cfg(test)]
mod helpers {
    use hive_core::{BodyPart, Pos};
    use hive_world::GridWorld;
    use crate::{BodySpec, Need, SpawnRequest};

    pub use hive_core::BodyPart::{Carry, Move, Work};

    /// One room with `Spawn1` holding its full 300 energy.
    pub fn world() -> GridWorld {
        let mut w = GridWorld::new(50, 50);
        w.add_spawn("Spawn1", Pos::new(25, 25));
        w
    }

    pub fn worker() -> BodySpec {
        BodySpec::new("worker", vec![Work, Carry, Move])
    }

    pub fn request(priority: u32, body: BodySpec, mission: &str) -> SpawnRequest {
        SpawnRequest { priority, body, mission: mission.to_owned(), need: Need::Normal }
    }

    pub fn spec(name: &str, ratio: Vec<BodyPart>) -> BodySpec {
        BodySpec::new(name, ratio)
    }
}

// ── Body manifests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod manifest {
    use hive_core::{BodyPart, body_cost, count_parts};
    use crate::BodyOptions;
    use super::helpers::*;

    #[test]
    fn repeats_ratio_while_affordable() {
        assert_eq!(worker().manifest(550).len(), 6);
        assert_eq!(worker().manifest(600).len(), 9);
    }

    #[test]
    fn never_below_one_unit() {
        assert_eq!(worker().manifest(0), vec![Work, Carry, Move]);
    }

    #[test]
    fn respects_max_units_and_energy_limit() {
        let capped = worker().with_options(BodyOptions { max_units: Some(1), ..Default::default() });
        assert_eq!(capped.manifest(10_000).len(), 3);

        let limited = worker().with_options(BodyOptions { energy_limit: Some(450), ..Default::default() });
        assert_eq!(limited.manifest(10_000).len(), 6);
    }

    #[test]
    fn respects_part_limit() {
        let hauler = spec("hauler", vec![Carry, Move]);
        let body = hauler.manifest(100_000);
        assert_eq!(body.len(), 50);
        assert_eq!(body_cost(&body), 2_500);
    }

    #[test]
    fn move_ratio_replaces_ratio_moves() {
        let miner = spec("miner", vec![Work, Work, Carry, Move])
            .with_options(BodyOptions { move_ratio: Some(2), ..Default::default() });
        // k units: 3k parts + ceil(3k/2) moves; k = 3 costs exactly 1000.
        let body = miner.manifest(1_000);
        assert_eq!(count_parts(&body, BodyPart::Work), 6);
        assert_eq!(count_parts(&body, BodyPart::Move), 5);
        assert_eq!(body_cost(&body), 1_000);
    }

    #[test]
    fn empty_ratio_is_empty() {
        assert!(spec("nothing", vec![]).manifest(1_000).is_empty());
        assert_eq!(worker().min_cost(), 200);
    }
}

// ── request_creep ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod requests {
    use hive_behavior::{AgentMemories, AgentMemory};
    use hive_core::{AgentName, Pos};
    use crate::{Need, RequestOutcome, SpawnQueue};
    use super::helpers::*;

    #[test]
    fn orphan_beats_production() {
        let mut w = world();
        w.add_agent("worker-9", Pos::new(5, 5), vec![Work, Carry, Move]).unwrap();
        let mut agents = AgentMemories::new();
        agents.insert(AgentName::new("worker-9"), AgentMemory::new("worker", None));
        let mut q = SpawnQueue::new("Spawn1");

        let out = q.request_creep(request(3, worker(), "upgrade-W1"), &w, &w, &mut agents);
        assert_eq!(out, RequestOutcome::Existing(AgentName::new("worker-9")));
        assert_eq!(q.len(), 0);
        assert_eq!(agents["worker-9"].mission.as_deref(), Some("upgrade-W1"));
    }

    #[test]
    fn orphan_must_be_alive_and_match() {
        let mut w = world();
        w.add_agent("hauler-1", Pos::new(5, 5), vec![Carry, Move]).unwrap();
        let mut agents = AgentMemories::new();
        agents.insert(AgentName::new("worker-dead"), AgentMemory::new("worker", None));
        agents.insert(AgentName::new("hauler-1"), AgentMemory::new("hauler", None));
        let mut q = SpawnQueue::new("Spawn1");

        let out = q.request_creep(request(3, worker(), "upgrade-W1"), &w, &w, &mut agents);
        assert!(matches!(out, RequestOutcome::Reserved(_)));
        assert_eq!(q.len(), 1);
        assert!(agents["hauler-1"].is_orphan());
    }

    #[test]
    fn reservation_names_are_unique() {
        let w = world();
        let mut agents = AgentMemories::new();
        agents.insert(AgentName::new("worker-1"), AgentMemory::new("worker", Some("x".into())));
        let mut q = SpawnQueue::new("Spawn1");

        let a = q.request_creep(request(3, worker(), "m"), &w, &w, &mut agents);
        let b = q.request_creep(request(3, worker(), "m"), &w, &w, &mut agents);
        assert_eq!(a.name().as_str(), "worker-0");
        assert_eq!(b.name().as_str(), "worker-2");
        assert!(q.is_pending("worker-0"));
        assert!(!q.is_pending("worker-1"));
    }

    #[test]
    fn queue_is_sorted_by_priority() {
        let w = world();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        q.request_creep(request(5, worker(), "low"), &w, &w, &mut agents);
        q.request_creep(request(1, worker(), "high"), &w, &w, &mut agents);
        q.request_creep(request(3, worker(), "mid"), &w, &w, &mut agents);

        let order: Vec<&str> = q.requests().iter().map(|r| r.mission.as_str()).collect();
        assert_eq!(order, ["high", "mid", "low"]);
    }

    #[test]
    fn critical_need_sizes_to_available_energy() {
        let mut w = world();
        for x in 0..5 {
            w.add_extension(Pos::new(10 + x, 10));
        }
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");

        let mut critical = request(1, worker(), "harvest-a");
        critical.need = Need::Critical;
        let RequestOutcome::Reserved(small) = q.request_creep(critical, &w, &w, &mut agents) else {
            panic!("expected a reservation");
        };
        let RequestOutcome::Reserved(full) = q.request_creep(request(1, worker(), "harvest-b"), &w, &w, &mut agents)
        else {
            panic!("expected a reservation");
        };
        assert_eq!(small.parts.len(), 3);
        assert_eq!(full.parts.len(), 6);
    }

    #[test]
    fn cancel_mission_drops_its_requests() {
        let w = world();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        q.request_creep(request(1, worker(), "a"), &w, &w, &mut agents);
        q.request_creep(request(1, worker(), "b"), &w, &w, &mut agents);
        assert_eq!(q.cancel_mission("a"), 1);
        assert_eq!(q.len(), 1);
    }
}

// ── run ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use hive_behavior::AgentMemories;
    use hive_core::{AgentName, Pos, ResourceKind};
    use hive_world::{Spawner, World};
    use crate::{SpawnError, SpawnQueue};
    use super::helpers::*;

    #[test]
    fn empty_queue_is_a_no_op() {
        let mut w = world();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        assert_eq!(q.run(&mut w, &mut agents).unwrap(), None);
        assert_eq!(w.available_resource("Spawn1"), 300);
    }

    #[test]
    fn commits_head_and_writes_memory() {
        let mut w = world();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        q.request_creep(request(1, worker(), "upgrade-W1"), &w, &w, &mut agents);

        let name = q.run(&mut w, &mut agents).unwrap().unwrap();
        assert_eq!(name.as_str(), "worker-0");
        assert!(q.is_empty());
        assert!(w.agent("worker-0").unwrap().spawning);
        assert_eq!(w.available_resource("Spawn1"), 100);
        let mem = &agents[&name];
        assert_eq!(mem.mission.as_deref(), Some("upgrade-W1"));
        assert_eq!(mem.body, "worker");
    }

    #[test]
    fn strict_priority_without_fallback() {
        let mut w = world();
        let ext = w.add_extension(Pos::new(10, 10));
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        let heavy = spec("heavy", vec![Work, Work, Work, Move]);
        let light = spec("light", vec![Move]);
        q.request_creep(request(5, light, "cheap"), &w, &w, &mut agents);
        q.request_creep(request(1, heavy, "urgent"), &w, &w, &mut agents);

        // 350 needed, 300 available: nothing happens, the cheap one waits too.
        assert_eq!(q.run(&mut w, &mut agents).unwrap(), None);
        assert_eq!(q.len(), 2);
        assert_eq!(w.available_resource("Spawn1"), 300);

        w.set_resource(ext, ResourceKind::Energy, 50).unwrap();
        let name = q.run(&mut w, &mut agents).unwrap().unwrap();
        assert_eq!(name.as_str(), "heavy-1");
        assert_eq!(q.requests()[0].mission, "cheap");
    }

    #[test]
    fn busy_facility_waits() {
        let mut w = world();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        let light = spec("light", vec![Move]);
        q.request_creep(request(1, light.clone(), "a"), &w, &w, &mut agents);
        q.request_creep(request(1, light, "b"), &w, &w, &mut agents);

        assert!(q.run(&mut w, &mut agents).unwrap().is_some());
        assert_eq!(q.run(&mut w, &mut agents).unwrap(), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn rejected_commit_drops_request() {
        let mut w = world();
        // The world already knows this name but memory does not.
        w.add_agent("worker-0", Pos::new(1, 1), vec![Move]).unwrap();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        q.request_creep(request(1, worker(), "m"), &w, &w, &mut agents);

        let err = q.run(&mut w, &mut agents).unwrap_err();
        assert!(matches!(err, SpawnError::CommitFailed { ref name, .. } if *name == AgentName::new("worker-0")));
        assert!(q.is_empty());
        assert!(agents.is_empty());
    }

    #[test]
    fn persisted_layout() {
        let w = world();
        let mut agents = AgentMemories::new();
        let mut q = SpawnQueue::new("Spawn1");
        q.request_creep(request(2, worker(), "m"), &w, &w, &mut agents);

        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["facility"], "Spawn1");
        assert_eq!(v["serial"], 1);
        assert_eq!(v["requests"][0]["name"], "worker-0");
        assert_eq!(v["requests"][0]["parts"][0], "work");
        let back: SpawnQueue = serde_json::from_value(v).unwrap();
        assert_eq!(back, q);
    }
}
