//! Unit tests for hive-behavior.

#[cfg(test)]
mod helpers {
    use hive_core::{BodyPart, Pos, ResourceKind};
    use hive_world::{Agent, GridWorld, World};

    pub use hive_core::BodyPart::{Carry, Move, Work};

    pub fn world() -> GridWorld {
        GridWorld::new(100, 50)
    }

    /// Add agent `name` at `pos` carrying `energy`.
    pub fn add_agent(w: &mut GridWorld, name: &str, pos: Pos, body: Vec<BodyPart>, energy: u32) {
        w.add_agent(name, pos, body).unwrap();
        w.agent_mut(name).unwrap().store.add(ResourceKind::Energy, energy);
    }

    pub fn agent<'a>(w: &'a GridWorld, name: &str) -> &'a Agent {
        w.agent(name).unwrap()
    }
}

// ── Validity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validity {
    use hive_core::{Pos, RoomCoord, Tick};
    use hive_world::World;
    use crate::{BehaviorKind, BehaviorOptions, BehaviorRecord};
    use super::helpers::*;

    #[test]
    fn timeout_boundary() {
        let mut w = world();
        let spawn = w.add_spawn("Spawn1", Pos::new(10, 10));
        add_agent(&mut w, "a", Pos::new(10, 12), vec![Move], 0);
        let target = w.object(spawn).unwrap();
        let rec = BehaviorRecord::new(BehaviorKind::Idle, target, BehaviorOptions::default(), Tick(100));
        let timeout = BehaviorKind::Idle.settings().timeout;

        w.set_tick(Tick(100 + timeout - 1));
        assert!(rec.is_valid(agent(&w, "a"), &w));
        w.set_tick(Tick(100 + timeout));
        assert!(!rec.is_valid(agent(&w, "a"), &w));
    }

    #[test]
    fn blind_behavior_survives_hidden_room() {
        let mut w = world();
        let ctrl = w.add_controller(Pos::new(60, 10));
        add_agent(&mut w, "u", Pos::new(45, 10), vec![Work, Carry, Move], 50);
        let rec = BehaviorRecord::new(
            BehaviorKind::Upgrade,
            w.object(ctrl).unwrap(),
            BehaviorOptions::default(),
            Tick(0),
        );

        w.hide_room(RoomCoord { x: 1, y: 0 });
        assert!(w.object(ctrl).is_none());
        assert!(rec.is_valid(agent(&w, "u"), &w));
    }

    #[test]
    fn blind_option_overrides_settings() {
        let mut w = world();
        let container = w.add_container(Pos::new(61, 10));
        add_agent(&mut w, "h", Pos::new(45, 10), vec![Carry, Move], 50);
        let target = w.object(container).unwrap();
        let sighted = BehaviorRecord::new(BehaviorKind::Transfer, target, BehaviorOptions::default(), Tick(0));
        let blind = BehaviorRecord::new(
            BehaviorKind::Transfer,
            target,
            BehaviorOptions::default().blind(true),
            Tick(0),
        );

        w.hide_room(RoomCoord { x: 1, y: 0 });
        assert!(!sighted.is_valid(agent(&w, "h"), &w));
        assert!(blind.is_valid(agent(&w, "h"), &w));
    }

    #[test]
    fn destroyed_target_in_visible_room_is_invalid() {
        let mut w = world();
        let ctrl = w.add_controller(Pos::new(10, 10));
        add_agent(&mut w, "u", Pos::new(12, 10), vec![Work, Carry, Move], 50);
        let rec = BehaviorRecord::new(
            BehaviorKind::Upgrade,
            w.object(ctrl).unwrap(),
            BehaviorOptions::default(),
            Tick(0),
        );
        w.remove_object(ctrl);
        assert!(!rec.is_valid(agent(&w, "u"), &w));
    }

    #[test]
    fn harvest_needs_room_unless_dropping_off() {
        let mut w = world();
        let src = w.add_source(Pos::new(5, 5), 3000);
        let container = w.add_container(Pos::new(5, 6));
        add_agent(&mut w, "h", Pos::new(5, 7), vec![Work, Carry, Move], 50);
        let plain = BehaviorRecord::new(BehaviorKind::Harvest, w.object(src).unwrap(), Default::default(), Tick(0));
        let mut parked = plain.clone();
        parked.data.dropoff = Some(container);

        assert!(!plain.is_valid(agent(&w, "h"), &w));
        assert!(parked.is_valid(agent(&w, "h"), &w));
    }

    #[test]
    fn work_tasks_need_energy() {
        let mut w = world();
        let ctrl = w.add_controller(Pos::new(10, 10));
        add_agent(&mut w, "u", Pos::new(12, 10), vec![Work, Carry, Move], 0);
        let rec = BehaviorRecord::new(BehaviorKind::Upgrade, w.object(ctrl).unwrap(), Default::default(), Tick(0));
        assert!(!rec.is_valid(agent(&w, "u"), &w));
    }
}

// ── Running ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod running {
    use hive_core::{AgentName, Pos, ResourceKind, Tick};
    use hive_world::{ResultCode, World};
    use crate::{BehaviorKind, BehaviorOptions, BehaviorRecord, TaskData};
    use super::helpers::*;

    #[test]
    fn moves_or_works_never_both() {
        let mut w = world();
        let src = w.add_source(Pos::new(5, 0), 3000);
        add_agent(&mut w, "h", Pos::new(0, 0), vec![Work, Carry, Move], 0);
        let name = AgentName::new("h");
        let mut rec = BehaviorRecord::new(BehaviorKind::Harvest, w.object(src).unwrap(), Default::default(), Tick(0));

        assert_eq!(rec.run(&name, &mut w), ResultCode::Ok);
        assert_ne!(agent(&w, "h").pos, Pos::new(0, 0));
        assert_eq!(agent(&w, "h").energy(), 0);

        for _ in 0..3 {
            w.end_tick();
            rec.run(&name, &mut w);
        }
        let parked = agent(&w, "h").pos;
        assert!(parked.in_range_to(Pos::new(5, 0), 1));
        assert_eq!(agent(&w, "h").energy(), 0);

        w.end_tick();
        assert_eq!(rec.run(&name, &mut w), ResultCode::Ok);
        assert_eq!(agent(&w, "h").pos, parked);
        assert_eq!(agent(&w, "h").energy(), 2);
    }

    #[test]
    fn harvester_parks_on_dropoff() {
        let mut w = world();
        let src = w.add_source(Pos::new(5, 5), 3000);
        let container = w.add_container(Pos::new(5, 6));
        add_agent(&mut w, "h", Pos::new(5, 8), vec![Work, Move], 0);
        let name = AgentName::new("h");
        let data = TaskData { dropoff: Some(container), ..Default::default() };
        let mut rec = BehaviorRecord::new(BehaviorKind::Harvest, w.object(src).unwrap(), Default::default(), Tick(0))
            .with_data(data);

        rec.run(&name, &mut w);
        w.end_tick();
        rec.run(&name, &mut w);
        assert_eq!(agent(&w, "h").pos, Pos::new(5, 6));

        w.end_tick();
        assert_eq!(rec.run(&name, &mut w), ResultCode::Ok);
        assert_eq!(w.object(container).unwrap().energy(), 2);
    }

    #[test]
    fn transfer_is_one_shot() {
        let mut w = world();
        let container = w.add_container(Pos::new(5, 5));
        add_agent(&mut w, "h", Pos::new(5, 6), vec![Carry, Move], 50);
        let name = AgentName::new("h");
        let opts = BehaviorOptions::default().resource(ResourceKind::Energy).amount(20);
        let mut rec = BehaviorRecord::new(BehaviorKind::Transfer, w.object(container).unwrap(), opts, Tick(0));

        assert_eq!(rec.run(&name, &mut w), ResultCode::Ok);
        assert!(rec.data.completed);
        assert_eq!(w.object(container).unwrap().energy(), 20);
        assert!(!rec.is_valid(agent(&w, "h"), &w));
    }

    #[test]
    fn work_failure_is_reported_not_retried() {
        let mut w = world();
        let container = w.add_container(Pos::new(5, 5));
        add_agent(&mut w, "h", Pos::new(5, 6), vec![Carry, Move], 0);
        let name = AgentName::new("h");
        let mut rec = BehaviorRecord::new(BehaviorKind::Withdraw, w.object(container).unwrap(), Default::default(), Tick(0));
        assert_eq!(rec.run(&name, &mut w), ResultCode::NotEnoughResources);
        assert!(!rec.data.completed);
    }
}

// ── Task stack ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stack {
    use hive_core::{Pos, Tick};
    use hive_world::World;
    use crate::{BehaviorKind, BehaviorRecord, TaskData, TaskStack};
    use super::helpers::*;

    #[test]
    fn assign_is_idempotent() {
        let mut w = world();
        let ctrl = w.add_controller(Pos::new(10, 10));
        let site = w.add_construction_site(Pos::new(12, 12), hive_world::StructureKind::Road, 300);
        let mut tasks = TaskStack::new();

        let upgrade = |w: &hive_world::GridWorld, t: Tick| {
            BehaviorRecord::new(BehaviorKind::Upgrade, w.object(ctrl).unwrap(), Default::default(), t)
        };
        assert!(tasks.assign(upgrade(&w, Tick(0))));
        let before = tasks.clone();
        assert!(!tasks.assign(upgrade(&w, Tick(5))));
        assert_eq!(tasks, before);
        assert_eq!(tasks.base().unwrap().tick, Tick(0));

        let build = BehaviorRecord::new(BehaviorKind::Build, w.object(site).unwrap(), Default::default(), Tick(5));
        assert!(tasks.assign(build));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.top().unwrap().kind, BehaviorKind::Build);
    }

    #[test]
    fn assign_keeps_sub_tasks_of_unchanged_base() {
        let mut w = world();
        let ctrl = w.add_controller(Pos::new(10, 10));
        let container = w.add_container(Pos::new(8, 8));
        let mut tasks = TaskStack::new();
        let upgrade = BehaviorRecord::new(BehaviorKind::Upgrade, w.object(ctrl).unwrap(), Default::default(), Tick(0));
        let refuel = BehaviorRecord::new(BehaviorKind::Withdraw, w.object(container).unwrap(), Default::default(), Tick(0));

        tasks.assign(upgrade.clone());
        assert!(tasks.push(refuel.clone()));
        assert!(!tasks.push(refuel));
        assert!(!tasks.assign(upgrade));
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn invalid_top_falls_back() {
        let mut w = world();
        let ctrl = w.add_controller(Pos::new(10, 10));
        let container = w.add_container(Pos::new(11, 12));
        add_agent(&mut w, "u", Pos::new(12, 12), vec![Work, Carry, Move], 10);
        let mut tasks = TaskStack::new();
        tasks.assign(BehaviorRecord::new(BehaviorKind::Upgrade, w.object(ctrl).unwrap(), Default::default(), Tick(0)));
        let done = TaskData { completed: true, ..Default::default() };
        tasks.push(
            BehaviorRecord::new(BehaviorKind::Withdraw, w.object(container).unwrap(), Default::default(), Tick(0))
                .with_data(done),
        );

        let current = tasks.current(agent(&w, "u"), &w).unwrap();
        assert_eq!(current.kind, BehaviorKind::Upgrade);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn everything_invalid_empties_stack() {
        let mut w = world();
        let spawn = w.add_spawn("Spawn1", Pos::new(10, 10));
        add_agent(&mut w, "a", Pos::new(10, 12), vec![Move], 0);
        let mut tasks = TaskStack::new();
        tasks.assign(BehaviorRecord::new(BehaviorKind::Idle, w.object(spawn).unwrap(), Default::default(), Tick(0)));

        w.set_tick(Tick(50));
        assert!(tasks.current(agent(&w, "a"), &w).is_none());
        assert!(tasks.is_empty());
    }
}

// ── Runner & memory ───────────────────────────────────────────────────────────

#[cfg(test)]
mod runner {
    use hive_core::{AgentName, Pos, Tick};
    use hive_world::{ResultCode, Spawner, World};
    use crate::{AgentMemory, BehaviorError, BehaviorKind, BehaviorRecord, TaskStack, run_agent};
    use super::helpers::*;

    #[test]
    fn missing_agent_is_an_error() {
        let mut w = world();
        let mut tasks = TaskStack::new();
        let err = run_agent(&AgentName::new("ghost"), &mut tasks, &mut w).unwrap_err();
        assert!(matches!(err, BehaviorError::AgentNotFound(_)));
    }

    #[test]
    fn spawning_and_idle_agents_do_nothing() {
        let mut w = world();
        w.add_spawn("Spawn1", Pos::new(10, 10));
        let name = AgentName::new("fresh");
        assert_eq!(w.commit_production("Spawn1", &[Move], &name), ResultCode::Ok);
        let mut tasks = TaskStack::new();
        assert_eq!(run_agent(&name, &mut tasks, &mut w).unwrap(), None);

        add_agent(&mut w, "bored", Pos::new(1, 1), vec![Move], 0);
        assert_eq!(run_agent(&AgentName::new("bored"), &mut tasks, &mut w).unwrap(), None);
    }

    #[test]
    fn runs_current_task() {
        let mut w = world();
        let spawn = w.add_spawn("Spawn1", Pos::new(10, 10));
        add_agent(&mut w, "a", Pos::new(10, 15), vec![Move], 0);
        let mut tasks = TaskStack::new();
        tasks.assign(BehaviorRecord::new(BehaviorKind::Idle, w.object(spawn).unwrap(), Default::default(), Tick(0)));

        let code = run_agent(&AgentName::new("a"), &mut tasks, &mut w).unwrap();
        assert_eq!(code, Some(ResultCode::Ok));
        assert_eq!(agent(&w, "a").pos.y, 14);
    }

    #[test]
    fn memory_json_layout() {
        let mut w = world();
        let spawn = w.add_spawn("Spawn1", Pos::new(10, 10));
        let mut mem = AgentMemory::new("hauler", Some("logistics-W1".into()));
        mem.tasks.assign(BehaviorRecord::new(BehaviorKind::Idle, w.object(spawn).unwrap(), Default::default(), Tick(7)));

        let v = serde_json::to_value(&mem).unwrap();
        assert_eq!(v["mission"], "logistics-W1");
        assert_eq!(v["mem"][0]["name"], "idle");
        assert_eq!(v["mem"][0]["tick"], 7);

        let back: AgentMemory = serde_json::from_value(v).unwrap();
        assert_eq!(back, mem);

        mem.release();
        assert!(mem.is_orphan());
        assert!(mem.tasks.is_empty());
    }
}
