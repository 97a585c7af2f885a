//! `hive-spawn`: arbitration of one production facility among many
//! competing missions.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`body`]    | `BodySpec`, `BodyOptions`, manifest sizing                |
//! | [`request`] | `SpawnRequest`, `Need`, `QueuedRequest`, `RequestOutcome` |
//! | [`queue`]   | `SpawnQueue`: orphan reuse, priority queue, commit       |
//! | [`error`]   | `SpawnError`, `SpawnResult<T>`                            |

pub mod body;
pub mod error;
pub mod queue;
pub mod request;

#[cfg(test)]
mod tests;

pub use body::{BodyOptions, BodySpec};
pub use error::{SpawnError, SpawnResult};
pub use queue::SpawnQueue;
pub use request::{Need, QueuedRequest, RequestOutcome, Reservation, SpawnRequest};
