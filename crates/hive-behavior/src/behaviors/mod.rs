//! Concrete leaf behaviors, one unit struct per [`BehaviorKind`][crate::BehaviorKind].

mod build;
mod harvest;
mod idle;
mod pickup;
mod repair;
mod transfer;
mod upgrade;
mod withdraw;

pub use build::BuildBehavior;
pub use harvest::HarvestBehavior;
pub use idle::IdleBehavior;
pub use pickup::PickupBehavior;
pub use repair::RepairBehavior;
pub use transfer::TransferBehavior;
pub use upgrade::UpgradeBehavior;
pub use withdraw::WithdrawBehavior;

use hive_core::BodyPart;
use hive_world::Agent;

/// Has at least one `Work` part and some energy to spend.
pub(crate) fn can_spend_energy(agent: &Agent) -> bool {
    agent.parts(BodyPart::Work) > 0 && agent.energy() > 0
}
