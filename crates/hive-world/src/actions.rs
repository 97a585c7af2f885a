//! Leaf work actions and the result codes they return.

use hive_core::{ObjectId, ResourceKind};

/// Outcome of a movement or work action.
///
/// Result codes are not errors: every variant other than `Ok` describes a
/// transient or resource condition that the calling mission re-evaluates on
/// the next tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ResultCode {
    Ok,
    /// The agent is not close enough to the target.
    NotInRange,
    /// The agent (or target, for withdrawals) lacks the resource.
    NotEnoughResources,
    /// The target does not exist or cannot take this action.
    InvalidTarget,
    /// The receiving store has no room.
    Full,
    /// The agent is still spawning or has already acted this tick.
    Busy,
    /// No walkable path to the destination.
    NoPath,
    /// The agent's body lacks the part the action needs.
    NoBodyPart,
}

impl ResultCode {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == ResultCode::Ok
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Ok                 => "ok",
            ResultCode::NotInRange         => "not_in_range",
            ResultCode::NotEnoughResources => "not_enough_resources",
            ResultCode::InvalidTarget      => "invalid_target",
            ResultCode::Full               => "full",
            ResultCode::Busy               => "busy",
            ResultCode::NoPath             => "no_path",
            ResultCode::NoBodyPart         => "no_body_part",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource-specific work action against a target object.
///
/// `amount: None` means "as much as possible".
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
    Harvest(ObjectId),
    Transfer { target: ObjectId, resource: ResourceKind, amount: Option<u32> },
    Withdraw { target: ObjectId, resource: ResourceKind, amount: Option<u32> },
    Pickup(ObjectId),
    Build(ObjectId),
    Repair(ObjectId),
    Upgrade(ObjectId),
}

impl Action {
    /// The object the action is aimed at.
    pub fn target(self) -> ObjectId {
        match self {
            Action::Harvest(id)
            | Action::Pickup(id)
            | Action::Build(id)
            | Action::Repair(id)
            | Action::Upgrade(id) => id,
            Action::Transfer { target, .. } | Action::Withdraw { target, .. } => target,
        }
    }

    /// Largest Chebyshev distance at which the action succeeds.
    pub fn range(self) -> u32 {
        match self {
            Action::Build(_) | Action::Repair(_) | Action::Upgrade(_) => 3,
            _ => 1,
        }
    }
}
