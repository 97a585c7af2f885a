//! colony: single-room demo for the hive coordination framework.
//!
//! Seeds one colony operation on a 50×50 `GridWorld` and lets it grow its
//! own missions: harvesting at both sources, upgrading, building and
//! hauling.  Usage:
//!
//! ```text
//! colony [config.json] [output-dir]
//! ```
//!
//! `RUST_LOG` overrides the config's `log_filter`.

mod layout;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hive_core::{HiveConfig, RoomCoord, SimRng, Tick};
use hive_kernel::{KernelBuilder, KernelObserver, Retirement, TickStats};
use hive_output::{CsvStatsWriter, StatsObserver, StatsWriter};
use hive_world::World;

const COLONY: &str = "W1";
const TERRAIN_STREAM: u64 = 1;

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: StatsWriter> {
    inner:    StatsObserver<W>,
    spawned:  usize,
    retired:  usize,
    failures: usize,
}

impl<W: StatsWriter> CountingObserver<W> {
    fn new(inner: StatsObserver<W>) -> Self {
        Self { inner, spawned: 0, retired: 0, failures: 0 }
    }
}

impl<W: StatsWriter> KernelObserver for CountingObserver<W> {
    fn on_mission_retired(&mut self, tick: Tick, retirement: &Retirement) {
        self.retired += 1;
        self.inner.on_mission_retired(tick, retirement);
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        self.spawned += stats.spawned.len();
        self.failures += stats.failures;
        self.inner.on_tick_end(stats);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => HiveConfig::load(Path::new(&path)).with_context(|| format!("loading {path}"))?,
        None => HiveConfig::default(),
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output/colony"));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // 1. World.
    let mut rng = SimRng::stream(config.seed, TERRAIN_STREAM);
    let world = layout::build_room(&mut rng);
    info!(objects = world.objects_in_room(RoomCoord::default()).len(), "room built");

    // 2. Kernel.
    let mut kernel = KernelBuilder::new(config.clone(), world)
        .colony(COLONY, RoomCoord::default(), layout::SPAWN)
        .build()?;

    // 3. Output.
    let writer = CsvStatsWriter::new(&out_dir)?;
    let mut obs = CountingObserver::new(StatsObserver::new(writer, &config));

    // 4. Run.
    let t0 = Instant::now();
    let end = kernel.run(&mut obs, |w| w.end_tick());
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    let memory_path = out_dir.join("memory.json");
    kernel.save_memory(&memory_path)?;

    // 5. Summary.
    println!("Ran {} ticks in {:.3} s", end.0, elapsed.as_secs_f64());
    println!("  agents produced : {}", obs.spawned);
    println!("  missions retired: {}", obs.retired);
    println!("  phase failures  : {}", obs.failures);
    println!("  output          : {}", out_dir.display());
    println!();

    let mut crews: BTreeMap<&str, usize> = BTreeMap::new();
    for mem in kernel.memory.agents.values() {
        *crews.entry(mem.mission.as_deref().unwrap_or("(orphan)")).or_default() += 1;
    }
    println!("{:<24} {:<10} {:>6}", "Mission", "Kind", "Agents");
    println!("{}", "-".repeat(42));
    for (name, record) in &kernel.memory.missions {
        println!("{:<24} {:<10} {:>6}", name, record.kind, crews.get(name.as_str()).copied().unwrap_or(0));
    }
    if let Some(orphans) = crews.get("(orphan)") {
        println!("{:<24} {:<10} {:>6}", "(orphan)", "", orphans);
    }
    println!();
    println!("Live agents: {}", kernel.world.agents().len());

    Ok(())
}
