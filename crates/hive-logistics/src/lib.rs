//! `hive-logistics`: transfer requests and hauler route planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`request`] | `NewRequest`, `TransferRequest`, `TransferKind`              |
//! | [`plan`]    | `PlanState`, `PlanStep`, `RoutePlan`, `plan_state_reducer`   |
//! | [`planner`] | `project_step`, `append_request_to_plan`                     |
//! | [`network`] | `LogisticsNetwork`: request book plus one plan per hauler   |
//! | [`error`]   | `LogisticsError`, `LogisticsResult<T>`                       |
//!
//! # Projection
//!
//! A plan never looks at the world after the fact: each leg is projected
//! from the plan's `end` state at the moment it is appended, and `end` is the
//! fold of [`plan_state_reducer`] over every leg.  When reality diverges
//! (a leg completes, a request vanishes) the whole plan is re-projected from
//! the hauler's actual state instead of being patched.

pub mod error;
pub mod network;
pub mod plan;
pub mod planner;
pub mod request;


pub use error::{LogisticsError, LogisticsResult};
pub use network::{LogisticsNetwork, NetworkUpdate};
pub use plan::{PlanState, PlanStep, RoutePlan, plan_state_reducer};
pub use planner::{HAULER_RANGE, append_request_to_plan, project_step};
pub use request::{NewRequest, TransferKind, TransferRequest};
