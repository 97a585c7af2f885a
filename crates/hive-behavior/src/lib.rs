//! `hive-behavior`: resumable, serializable per-agent tasks.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`record`]    | `BehaviorRecord`, `BehaviorKind`, options and scratch data |
//! | [`behavior`]  | `Behavior` trait, `Settings`, kind → implementation switch |
//! | [`behaviors`] | One unit struct per leaf behavior                          |
//! | [`stack`]     | `TaskStack`: layered tasks with fall-back on invalidity   |
//! | [`memory`]    | `AgentMemory`: everything persisted per agent             |
//! | [`runner`]    | `run_agent`: validate and run one agent's current task    |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                       |
//!
//! # Design notes
//!
//! A record is only data.  Each tick the executable behavior is looked up
//! from `record.kind` through a closed `match`, validity is re-checked
//! against the live world, and the agent either moves or works (never
//! both).  Nothing in this crate keeps state between calls.

pub mod behavior;
pub mod behaviors;
pub mod error;
pub mod memory;
pub mod record;
pub mod runner;
pub mod stack;

#[cfg(test)]
mod tests;

pub use behavior::{Behavior, Settings};
pub use error::{BehaviorError, BehaviorResult};
pub use memory::{AgentMemories, AgentMemory};
pub use record::{BehaviorKind, BehaviorOptions, BehaviorRecord, TargetRef, TaskData};
pub use runner::run_agent;
pub use stack::TaskStack;
