//! Deterministic RNG for synthetic worlds.
//!
//! Scheduling itself never draws random numbers; only world generation
//! (terrain scatter, object placement) does.  Seeding from
//! `HiveConfig::seed` keeps generated worlds reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Pos;

/// Seeded RNG for world generation.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// An independent stream for one part of the world (a room, a layer),
    /// so adding draws to one part leaves the others unchanged.
    pub fn stream(seed: u64, stream: u64) -> Self {
        SimRng::new(seed ^ stream.rotate_left(32).wrapping_add(0x2545_f491))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A tile of a `width × height` grid that is not on its border.
    pub fn interior_pos(&mut self, width: i32, height: i32) -> Pos {
        Pos::new(self.0.gen_range(1..(width - 1).max(2)), self.0.gen_range(1..(height - 1).max(2)))
    }
}
