//! Demo room layout: one spawn, two sources with containers, a storage, a
//! controller, two build sites, a worn wall and a scatter of swamp.

use hive_core::{Pos, SimRng};
use hive_world::{GridWorld, StructureKind, TerrainKind};

pub const SPAWN: &str = "Spawn1";

const SIZE:        i32 = 50;
const SOURCE_CAP:  u32 = 3_000;
const SWAMP_TILES: usize = 120;

/// Build the demo room.  Swamp placement is drawn from `rng`; everything
/// else is fixed.
pub fn build_room(rng: &mut SimRng) -> GridWorld {
    let mut world = GridWorld::new(SIZE, SIZE);

    let mut fixed = vec![
        Pos::new(25, 25), // spawn
        Pos::new(8, 8),   // source a
        Pos::new(9, 9),   // container a
        Pos::new(42, 12), // source b
        Pos::new(41, 13), // container b
        Pos::new(27, 25), // storage
        Pos::new(25, 44), // controller
    ];
    world.add_spawn(SPAWN, fixed[0]);
    world.add_source(fixed[1], SOURCE_CAP);
    world.add_container(fixed[2]);
    world.add_source(fixed[3], SOURCE_CAP);
    world.add_container(fixed[4]);
    world.add_storage(fixed[5]);
    world.add_controller(fixed[6]);

    for pos in [Pos::new(23, 23), Pos::new(23, 27)] {
        world.add_extension(pos);
        fixed.push(pos);
    }
    for (pos, kind, total) in [
        (Pos::new(27, 23), StructureKind::Extension, 3_000),
        (Pos::new(26, 30), StructureKind::Road, 300),
    ] {
        world.add_construction_site(pos, kind, total);
        fixed.push(pos);
    }

    // A worn wall segment east of the spawn for idle builders to repair.
    for y in 20..24 {
        let pos = Pos::new(33, y);
        world.add_wall(pos, 2_000, 10_000);
        fixed.push(pos);
    }

    let mut placed = 0;
    while placed < SWAMP_TILES {
        let pos = rng.interior_pos(SIZE, SIZE);
        if fixed.contains(&pos) || world.terrain().kind(pos) == TerrainKind::Swamp {
            continue;
        }
        world.terrain_mut().set(pos, TerrainKind::Swamp);
        placed += 1;
    }
    world
}
