//! `hive-store`: the persisted memory of the hive framework.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`memory`] | `Memory`: the four top-level maps, JSON load/save          |
//! | [`record`] | `MissionRecord`: roster, reservation and typed payload     |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                              |
//!
//! The host may discard the whole process between ticks, so a `Memory`
//! loaded from JSON must be enough to carry on exactly where the last tick
//! stopped.

pub mod error;
pub mod memory;
pub mod record;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use memory::Memory;
pub use record::MissionRecord;
