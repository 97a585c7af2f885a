//! Unit tests for hive-mission.

#[cfg(test)]
mod helpers {
    use hive_behavior::AgentMemory;
    use hive_core::{AgentName, BodyPart, HiveConfig, ObjectId, Pos};
    use hive_store::Memory;
    use hive_world::{GridWorld, World};
    use crate::{
        HarvestData, MissionContext, MissionHandle, MissionKind, RollCall, Viability, construct, init_mission,
    };

    pub use hive_core::BodyPart::{Carry, Move, Work};

    pub const HARVEST: &str = "harvest-W1-src";

    /// One room: `Spawn1` at (25,25), a source at (10,10), a controller at
    /// (40,40).
    pub struct Colony {
        pub world:  GridWorld,
        pub memory: Memory,
        pub config: HiveConfig,
        pub source: ObjectId,
    }

    pub fn colony() -> Colony {
        let mut world = GridWorld::new(50, 50);
        world.add_spawn("Spawn1", Pos::new(25, 25));
        let source = world.add_source(Pos::new(10, 10), 3_000);
        world.add_controller(Pos::new(40, 40));
        Colony { world, memory: Memory::new(), config: HiveConfig::default(), source }
    }

    pub fn miner_body() -> Vec<BodyPart> {
        vec![Work, Work, Carry, Move]
    }

    /// Register the harvest mission on the colony's source and load it.
    pub fn harvest(c: &mut Colony) -> Box<dyn MissionHandle> {
        let data = match c.world.object(c.source) {
            Some(src) => HarvestData::new(src),
            None => panic!("source missing"),
        };
        init_mission(&mut c.memory, HARVEST, MissionKind::Harvest, "W1", Some("Spawn1"), &data).unwrap();
        load(c, HARVEST)
    }

    pub fn load(c: &Colony, name: &str) -> Box<dyn MissionHandle> {
        match construct(name, &c.memory.missions[name]) {
            Ok(handle) => handle,
            Err(e) => panic!("construct {name}: {e}"),
        }
    }

    /// Put a ready agent in the world and give it memory under `mission`.
    pub fn member(c: &mut Colony, name: &str, pos: Pos, body: Vec<BodyPart>, spec: &str, mission: Option<&str>) {
        c.world.add_agent(name, pos, body).unwrap();
        c.memory.agents.insert(AgentName::new(name), AgentMemory::new(spec, mission.map(str::to_owned)));
    }

    pub fn refresh(handle: &mut dyn MissionHandle, c: &mut Colony) -> Viability {
        let mut ctx = MissionContext::new(&c.world, &c.world, &mut c.memory, &c.config);
        handle.refresh(&mut ctx).unwrap()
    }

    /// One full mission tick: refresh, roll call, run, save.
    pub fn step(handle: &mut dyn MissionHandle, c: &mut Colony) -> RollCall {
        let mut ctx = MissionContext::new(&c.world, &c.world, &mut c.memory, &c.config);
        assert_eq!(handle.refresh(&mut ctx).unwrap(), Viability::Viable);
        let report = handle.roll_call(&mut ctx).unwrap();
        handle.run(&mut ctx).unwrap();
        handle.save(&mut ctx).unwrap();
        report
    }

    /// One behavior pass over every agent with a body, then close the tick.
    pub fn behave(c: &mut Colony) {
        for (name, mem) in c.memory.agents.iter_mut() {
            if c.world.agent(name.as_str()).is_some() {
                hive_behavior::run_agent(name, &mut mem.tasks, &mut c.world).unwrap();
            }
        }
        c.world.end_tick();
    }

    /// Let every spawn queue commit its head request.
    pub fn run_spawns(c: &mut Colony) {
        let Memory { spawns, agents, .. } = &mut c.memory;
        for queue in spawns.values_mut() {
            queue.run(&mut c.world, agents).unwrap();
        }
    }

    pub fn queued(c: &Colony) -> usize {
        c.memory.spawns.get("Spawn1").map_or(0, |q| q.len())
    }
}

// ── Roll call ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod roll_call {
    use hive_core::{AgentName, Pos};
    use hive_spawn::RequestOutcome;
    use hive_world::World;
    use super::helpers::*;

    #[test]
    fn one_reservation_at_a_time() {
        let mut c = colony();
        let mut h = harvest(&mut c);

        let first = step(h.as_mut(), &mut c);
        let Some(RequestOutcome::Reserved(r)) = first.requested else { panic!("expected a reservation") };
        assert_eq!(h.record().next_creep.as_ref(), Some(&r.name));
        assert_eq!(queued(&c), 1);

        // Two miners wanted, none present: still only the one request.
        let second = step(h.as_mut(), &mut c);
        assert!(second.requested.is_none());
        assert_eq!(queued(&c), 1);
    }

    #[test]
    fn reservation_promoted_once_production_starts() {
        let mut c = colony();
        let mut h = harvest(&mut c);
        let reserved = step(h.as_mut(), &mut c).requested.unwrap().name().clone();

        run_spawns(&mut c);
        assert!(c.world.agent(reserved.as_str()).is_some_and(|a| a.spawning));

        let report = step(h.as_mut(), &mut c);
        assert_eq!(report.promoted, Some(reserved.clone()));
        assert_eq!(h.record().creeps, vec![reserved]);
        // The pool is still one short, so the slot is refilled at once.
        assert!(matches!(report.requested, Some(RequestOutcome::Reserved(_))));
    }

    #[test]
    fn stale_reservation_dropped_and_reissued() {
        let mut c = colony();
        let mut h = harvest(&mut c);
        let reserved = step(h.as_mut(), &mut c).requested.unwrap().name().clone();
        c.memory.spawns.get_mut("Spawn1").unwrap().cancel_mission(HARVEST);

        let report = step(h.as_mut(), &mut c);
        assert_eq!(report.dropped, Some(reserved.clone()));
        let again = report.requested.unwrap();
        assert_ne!(again.name(), &reserved);
        assert_eq!(h.record().next_creep.as_ref(), Some(again.name()));
    }

    #[test]
    fn orphan_reused_before_spawning() {
        let mut c = colony();
        member(&mut c, "old-miner", Pos::new(12, 10), miner_body(), "miner", None);
        let mut h = harvest(&mut c);

        let report = step(h.as_mut(), &mut c);
        assert_eq!(report.requested, Some(RequestOutcome::Existing(AgentName::new("old-miner"))));
        assert!(h.record().creeps.contains(&AgentName::new("old-miner")));
        assert_eq!(c.memory.agents["old-miner"].mission.as_deref(), Some(HARVEST));
        assert_eq!(queued(&c), 0);
    }

    #[test]
    fn stray_member_adopted() {
        let mut c = colony();
        member(&mut c, "lost", Pos::new(12, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);

        let report = step(h.as_mut(), &mut c);
        assert_eq!(report.adopted, vec![AgentName::new("lost")]);
        assert!(h.record().creeps.contains(&AgentName::new("lost")));
    }

    #[test]
    fn aging_member_replaced_ahead_of_time() {
        let mut c = colony();
        // A container next to the source caps the pool at one miner.
        c.world.add_container(Pos::new(11, 10));
        member(&mut c, "m", Pos::new(11, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);

        assert!(step(h.as_mut(), &mut c).requested.is_none());

        // Twelve ticks of production plus the 20-tick margin.
        c.world.agent_mut("m").unwrap().ticks_to_live = 31;
        let report = step(h.as_mut(), &mut c);
        assert!(matches!(report.requested, Some(RequestOutcome::Reserved(_))));
        assert_eq!(h.record().creeps, vec![AgentName::new("m")]);
    }

    #[test]
    fn dead_members_pruned_on_refresh() {
        let mut c = colony();
        member(&mut c, "m", Pos::new(11, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);
        step(h.as_mut(), &mut c);

        c.world.remove_agent("m");
        refresh(h.as_mut(), &mut c);
        assert!(h.record().creeps.is_empty());
    }
}

// ── Task assignment ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tasks {
    use hive_behavior::BehaviorKind;
    use hive_core::{Pos, ResourceKind};
    use super::helpers::*;

    #[test]
    fn miner_assigned_harvest_once() {
        let mut c = colony();
        member(&mut c, "m", Pos::new(11, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);

        step(h.as_mut(), &mut c);
        let before = c.memory.agents["m"].tasks.clone();
        step(h.as_mut(), &mut c);

        let tasks = &c.memory.agents["m"].tasks;
        assert_eq!(tasks, &before);
        assert_eq!(tasks.len(), 1);
        let base = tasks.base().unwrap();
        assert_eq!(base.kind, BehaviorKind::Harvest);
        assert_eq!(base.target.id, c.source);
    }

    #[test]
    fn full_miner_without_container_delivers() {
        let mut c = colony();
        // The spawn is full; the extension is the only sink.
        let extension = c.world.add_extension(Pos::new(14, 10));
        member(&mut c, "m", Pos::new(11, 10), miner_body(), "miner", Some(HARVEST));
        c.world.agent_mut("m").unwrap().store.set(ResourceKind::Energy, 50);
        let mut h = harvest(&mut c);

        step(h.as_mut(), &mut c);
        let tasks = &c.memory.agents["m"].tasks;
        assert_eq!(tasks.len(), 2);
        let top = tasks.top().unwrap();
        assert_eq!(top.kind, BehaviorKind::Transfer);
        assert_eq!(top.target.id, extension);
    }

    #[test]
    fn miner_with_container_drops_into_it() {
        let mut c = colony();
        let container = c.world.add_container(Pos::new(11, 10));
        member(&mut c, "m", Pos::new(11, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);

        step(h.as_mut(), &mut c);
        let base = c.memory.agents["m"].tasks.base().unwrap().clone();
        assert_eq!(base.data.dropoff, Some(container));
    }

    #[test]
    fn member_claimed_elsewhere_is_left_alone() {
        let mut c = colony();
        member(&mut c, "m", Pos::new(11, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);
        step(h.as_mut(), &mut c);

        c.memory.agents.get_mut("m").unwrap().mission = Some("upgrade-W1".into());
        c.memory.agents.get_mut("m").unwrap().tasks.clear();
        step(h.as_mut(), &mut c);
        assert!(c.memory.agents["m"].tasks.is_empty());
    }
}

// ── Viability and retirement ──────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use hive_core::{AgentName, Pos, RoomCoord};
    use crate::{MissionContext, Viability};
    use super::helpers::*;

    #[test]
    fn lost_source_is_non_viable() {
        let mut c = colony();
        let mut h = harvest(&mut c);
        c.world.remove_object(c.source);
        assert!(matches!(refresh(h.as_mut(), &mut c), Viability::NonViable(_)));
    }

    #[test]
    fn unobservable_source_stays_viable() {
        let mut c = colony();
        let mut h = harvest(&mut c);
        c.world.hide_room(RoomCoord::default());
        assert_eq!(refresh(h.as_mut(), &mut c), Viability::Viable);
    }

    #[test]
    fn retire_releases_members_and_cancels_requests() {
        let mut c = colony();
        member(&mut c, "m", Pos::new(12, 10), miner_body(), "miner", Some(HARVEST));
        let mut h = harvest(&mut c);
        step(h.as_mut(), &mut c);
        assert_eq!(queued(&c), 1);

        {
            let mut ctx = MissionContext::new(&c.world, &c.world, &mut c.memory, &c.config);
            h.retire(&mut ctx, "source no longer exists").unwrap();
        }
        assert!(!c.memory.missions.contains_key(HARVEST));
        assert_eq!(queued(&c), 0);
        let m = &c.memory.agents[&AgentName::new("m")];
        assert!(m.is_orphan());
        assert!(m.tasks.is_empty());
    }
}

// ── Record factory ────────────────────────────────────────────────────────────

#[cfg(test)]
mod kind {
    use std::collections::BTreeMap;
    use hive_store::{MissionRecord, StoreError};
    use crate::{HarvestData, MissionError, MissionKind, construct, init_mission};
    use super::helpers::*;

    #[test]
    fn tags_round_trip() {
        for kind in MissionKind::ALL {
            assert_eq!(MissionKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(MissionKind::from_tag("siege"), None);
    }

    #[test]
    fn unknown_tag_rejected() {
        let rec = MissionRecord::new("siege", "W1");
        assert!(matches!(construct("siege-W1", &rec), Err(MissionError::UnknownKind(ref k)) if k == "siege"));
    }

    #[test]
    fn corrupt_payload_rejected() {
        let rec = MissionRecord::new("harvest", "W1").with_data("harvest-W1-0", &"not a payload").unwrap();
        assert!(matches!(construct("harvest-W1-0", &rec), Err(MissionError::Store(_))));
    }

    #[test]
    fn init_is_idempotent() {
        let mut c = colony();
        let data = HarvestData { source: c.source, ..Default::default() };
        assert!(init_mission(&mut c.memory, HARVEST, MissionKind::Harvest, "W1", None, &data).unwrap());
        assert!(!init_mission(&mut c.memory, HARVEST, MissionKind::Harvest, "W1", None, &data).unwrap());
        assert_eq!(c.memory.missions.len(), 1);
    }

    #[test]
    fn unserialisable_payload_creates_nothing() {
        let mut c = colony();
        let data: BTreeMap<(u8, u8), u8> = BTreeMap::from([((0, 0), 1)]);
        let result = init_mission(&mut c.memory, HARVEST, MissionKind::Harvest, "W1", None, &data);
        assert!(matches!(result, Err(StoreError::MissionData { .. })));
        assert!(c.memory.missions.is_empty());
    }

    #[test]
    fn saved_payload_survives_reload() {
        let mut c = colony();
        let mut h = harvest(&mut c);
        step(h.as_mut(), &mut c);

        let json = c.memory.to_json().unwrap();
        c.memory = hive_store::Memory::from_json(&json).unwrap();
        let reloaded = load(&c, HARVEST);
        assert_eq!(reloaded.kind(), MissionKind::Harvest);
        assert_eq!(reloaded.record(), h.record());
    }
}

// ── Colony operation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod colony_op {
    use hive_core::{Pos, ResourceKind, RoomCoord};
    use hive_logistics::TransferKind;
    use hive_world::StructureKind;
    use crate::{Viability, init_colony};
    use super::helpers::*;

    #[test]
    fn creates_room_missions() {
        let mut c = colony();
        let second = c.world.add_source(Pos::new(40, 10), 3_000);
        c.world.add_construction_site(Pos::new(30, 30), StructureKind::Extension, 3_000);
        let name = init_colony(&mut c.memory, "W1", RoomCoord::default(), "Spawn1").unwrap();
        let mut op = load(&c, &name);

        let report = step(op.as_mut(), &mut c);
        assert!(report.requested.is_none());

        let names: Vec<&str> = c.memory.missions.keys().map(String::as_str).collect();
        assert!(names.contains(&format!("harvest-W1-{}", c.source.0).as_str()));
        assert!(names.contains(&format!("harvest-W1-{}", second.0).as_str()));
        for expected in ["colony-W1", "upgrade-W1", "build-W1", "logistics-W1"] {
            assert!(names.contains(&expected), "{expected} missing");
        }
        assert_eq!(names.len(), 6);
        assert_eq!(c.memory.missions["upgrade-W1"].spawn_source.as_deref(), Some("Spawn1"));
    }

    #[test]
    fn no_build_mission_without_sites() {
        let mut c = colony();
        let name = init_colony(&mut c.memory, "W1", RoomCoord::default(), "Spawn1").unwrap();
        let mut op = load(&c, &name);
        step(op.as_mut(), &mut c);
        assert!(!c.memory.missions.contains_key("build-W1"));
    }

    #[test]
    fn posts_supply_and_demand() {
        let mut c = colony();
        let extension = c.world.add_extension(Pos::new(26, 25));
        let container = c.world.add_container(Pos::new(11, 10));
        c.world.set_resource(container, ResourceKind::Energy, 400).unwrap();
        let storage = c.world.add_storage(Pos::new(30, 25));
        let name = init_colony(&mut c.memory, "W1", RoomCoord::default(), "Spawn1").unwrap();
        let mut op = load(&c, &name);

        step(op.as_mut(), &mut c);
        let network = &c.memory.networks["W1"];
        let mut posted: Vec<_> = network.requests().map(|r| (r.target, r.kind, r.amount)).collect();
        posted.sort_by_key(|p| p.0);
        let mut expected = vec![
            (extension, TransferKind::Delivery, 50),
            (container, TransferKind::Pickup, 400),
            (storage, TransferKind::Delivery, 400),
        ];
        expected.sort_by_key(|p| p.0);
        assert_eq!(posted, expected);

        // Posting again refreshes instead of duplicating.
        step(op.as_mut(), &mut c);
        assert_eq!(c.memory.networks["W1"].requests().count(), 3);
    }

    #[test]
    fn lost_spawn_is_non_viable() {
        let mut c = colony();
        let name = init_colony(&mut c.memory, "W1", RoomCoord::default(), "Spawn1").unwrap();
        let mut op = load(&c, &name);
        let spawn = c.world.spawn_id("Spawn1").unwrap();
        c.world.remove_object(spawn);
        assert_eq!(refresh(op.as_mut(), &mut c), Viability::non_viable("spawn destroyed"));
    }
}

// ── Logistics mission ─────────────────────────────────────────────────────────

#[cfg(test)]
mod logistics {
    use hive_behavior::BehaviorKind;
    use hive_core::{ObjectId, Pos, RequestId, ResourceKind, Tick};
    use hive_logistics::NewRequest;
    use crate::{LogisticsData, MissionHandle, MissionKind, init_mission};
    use super::helpers::*;

    const NAME: &str = "logistics-W1";

    struct Route {
        container: ObjectId,
        extension: ObjectId,
        pickup:    RequestId,
        delivery:  RequestId,
    }

    /// A hauler next to a container holding 300 energy, and an empty
    /// extension near the spawn.  Requests: take 100 out, put 50 in.
    fn setup(c: &mut Colony) -> (Box<dyn MissionHandle>, Route) {
        let container = c.world.add_container(Pos::new(20, 20));
        c.world.set_resource(container, ResourceKind::Energy, 300).unwrap();
        let extension = c.world.add_extension(Pos::new(26, 25));
        member(c, "hauler-a", Pos::new(21, 20), vec![Carry, Carry, Move], "hauler", Some(NAME));

        let network = c.memory.network_mut("W1");
        let cfg = &c.config.logistics;
        let pickup = network.register(NewRequest::pickup(container, ResourceKind::Energy, 100), Tick::ZERO, cfg);
        let delivery = network.register(NewRequest::delivery(extension, ResourceKind::Energy, 50), Tick::ZERO, cfg);

        init_mission(&mut c.memory, NAME, MissionKind::Logistics, "W1", Some("Spawn1"), &LogisticsData::default())
            .unwrap();
        (load(c, NAME), Route { container, extension, pickup, delivery })
    }

    #[test]
    fn hauler_gets_first_leg_as_task() {
        let mut c = colony();
        let (mut m, route) = setup(&mut c);

        step(m.as_mut(), &mut c);
        let top = c.memory.agents["hauler-a"].tasks.top().unwrap().clone();
        assert_eq!(top.kind, BehaviorKind::Withdraw);
        assert_eq!(top.target.id, route.container);
        assert_eq!(top.data.request, Some(route.pickup));
        assert_eq!(top.options.amount, Some(100));
        assert_eq!(c.memory.networks["W1"].plan("hauler-a").unwrap().len(), 2);
    }

    #[test]
    fn completed_leg_is_booked_and_next_handed_out() {
        let mut c = colony();
        let (mut m, route) = setup(&mut c);
        step(m.as_mut(), &mut c);

        // The withdraw went through.
        c.world.agent_mut("hauler-a").unwrap().store.set(ResourceKind::Energy, 100);
        c.world.set_resource(route.container, ResourceKind::Energy, 200).unwrap();
        c.memory.agents.get_mut("hauler-a").unwrap().tasks.top_mut().unwrap().data.completed = true;

        step(m.as_mut(), &mut c);
        let network = &c.memory.networks["W1"];
        assert!(network.request(route.pickup).is_none());
        let top = c.memory.agents["hauler-a"].tasks.top().unwrap().clone();
        assert_eq!(top.kind, BehaviorKind::Transfer);
        assert_eq!(top.target.id, route.extension);
        assert_eq!(top.data.request, Some(route.delivery));
        assert_eq!(c.memory.missions[NAME].data["completed"], 1);
    }

    #[test]
    fn failed_leg_is_abandoned() {
        let mut c = colony();
        let (mut m, route) = setup(&mut c);
        step(m.as_mut(), &mut c);

        c.world.remove_object(route.container);
        step(m.as_mut(), &mut c);

        let network = &c.memory.networks["W1"];
        // Still open, just nobody's leg any more.
        assert!(network.request(route.pickup).is_some());
        assert!(!network.is_assigned(route.pickup));
        assert_eq!(c.memory.missions[NAME].data["abandoned"], 1);
        assert!(c.memory.agents["hauler-a"].tasks.is_empty());
    }

    #[test]
    fn leg_dropped_by_behavior_pass_is_abandoned() {
        let mut c = colony();
        let (mut m, route) = setup(&mut c);
        step(m.as_mut(), &mut c);

        // The container runs dry, so the behavior pass pops the withdraw
        // before the mission sees it again.
        c.world.set_resource(route.container, ResourceKind::Energy, 0).unwrap();
        for _ in 0..5 {
            behave(&mut c);
            step(m.as_mut(), &mut c);
        }

        let network = &c.memory.networks["W1"];
        assert!(network.request(route.pickup).is_some());
        assert!(!network.is_assigned(route.pickup));
        assert_eq!(c.memory.missions[NAME].data["abandoned"], 1);
        assert!(c.memory.agents["hauler-a"].tasks.is_empty());
    }

    #[test]
    fn pool_grows_with_open_requests() {
        let mut c = colony();
        let (mut m, _) = setup(&mut c);
        assert!(step(m.as_mut(), &mut c).requested.is_none());

        let cfg = &c.config.logistics;
        let network = c.memory.networks.get_mut("W1").unwrap();
        for x in 0..3 {
            let pile = c.world.add_pile(Pos::new(5 + x, 40), ResourceKind::Energy, 30);
            network.register(NewRequest::pickup(pile, ResourceKind::Energy, 30), Tick::ZERO, cfg);
        }
        assert!(step(m.as_mut(), &mut c).requested.is_some());
    }
}
