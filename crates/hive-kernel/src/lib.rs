//! `hive-kernel`: per-tick orchestrator for the hive framework.
//!
//! # Tick order
//!
//! ```text
//! every tick:
//!   ① Registry   : rebuild each mission from its persisted record.
//!   ② Missions   : operations, then missions (name order):
//!                     refresh → roll call → run → save, or retire.
//!   ③ Spawn queue: each facility commits at most one production.
//!   ④ Behaviors  : every ready agent runs its current task.
//!   ⑤ Collection : memory of dead agents is dropped.
//! ```
//!
//! Mission request issuance therefore always precedes queue draining, which
//! precedes behavior execution.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashMap` for the mission registry.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hive_core::{HiveConfig, RoomCoord};
//! use hive_kernel::{KernelBuilder, NoopObserver};
//!
//! let mut kernel = KernelBuilder::new(HiveConfig::default(), world)
//!     .colony("W1", RoomCoord { x: 0, y: 0 }, "Spawn1")
//!     .build()?;
//! kernel.run(&mut NoopObserver, |w| w.end_tick());
//! ```

pub mod builder;
pub mod error;
pub mod kernel;
pub mod observer;
pub mod registry;
pub mod stats;


pub use builder::KernelBuilder;
pub use error::{KernelError, KernelResult};
pub use kernel::Kernel;
pub use observer::{KernelObserver, NoopObserver};
pub use registry::Registry;
pub use stats::{Retirement, TickStats};
