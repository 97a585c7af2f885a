//! Fluent builder for constructing a [`Kernel`].

use hive_core::{HiveConfig, RoomCoord};
use hive_mission::init_colony;
use hive_store::Memory;
use hive_world::{Spawner, World, WorldActions};

use crate::{Kernel, KernelError, KernelResult, Registry};

/// Fluent builder for [`Kernel<W>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                         |
/// |-----------------------------|---------------------------------|
/// | `.memory(m)`                | `Memory::new()` (fresh start)   |
/// | `.colony(name, room, spawn)`| no colony operations            |
///
/// # Example
///
/// ```rust,ignore
/// let mut kernel = KernelBuilder::new(config, world)
///     .colony("W1", RoomCoord { x: 0, y: 0 }, "Spawn1")
///     .build()?;
/// kernel.run(&mut NoopObserver, |w| w.end_tick());
/// ```
pub struct KernelBuilder<W: WorldActions + Spawner> {
    config:   HiveConfig,
    world:    W,
    memory:   Option<Memory>,
    colonies: Vec<(String, RoomCoord, String)>,
}

impl<W: WorldActions + Spawner> KernelBuilder<W> {
    pub fn new(config: HiveConfig, world: W) -> Self {
        Self { config, world, memory: None, colonies: Vec::new() }
    }

    /// Resume from persisted memory, e.g. one read with
    /// [`Memory::load`].
    pub fn memory(mut self, memory: Memory) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Make sure a colony operation exists for `name`, producing from the
    /// spawn called `spawn` in `room`.  A colony already present in memory
    /// is left untouched.
    pub fn colony(mut self, name: impl Into<String>, room: RoomCoord, spawn: impl Into<String>) -> Self {
        self.colonies.push((name.into(), room, spawn.into()));
        self
    }

    /// Validate inputs, seed colony operations and return a ready-to-run
    /// [`Kernel`].
    pub fn build(self) -> KernelResult<Kernel<W>> {
        self.config.validate()?;

        let mut memory = self.memory.unwrap_or_default();
        for (colony, room, spawn) in &self.colonies {
            let found = self
                .world
                .objects_in_room(*room)
                .iter()
                .any(|o| o.spawn_name() == Some(spawn.as_str()));
            if !found {
                return Err(KernelError::UnknownSpawn { colony: colony.clone(), spawn: spawn.clone() });
            }
            init_colony(&mut memory, colony, *room, spawn)?;
        }

        Ok(Kernel {
            config:   self.config,
            world:    self.world,
            memory,
            registry: Registry::new(),
        })
    }
}
