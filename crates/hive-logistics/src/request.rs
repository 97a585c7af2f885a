//! Transfer requests: "move this much of that resource into or out of this
//! target".

use serde::{Deserialize, Serialize};

use hive_core::{ObjectId, RequestId, ResourceKind, Tick};

/// Direction of a transfer, seen from the hauler.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Take resources out of the target.
    Pickup,
    /// Put resources into the target.
    Delivery,
}

impl TransferKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferKind::Pickup   => "pickup",
            TransferKind::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for TransferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a caller hands to [`LogisticsNetwork::register`][crate::LogisticsNetwork::register].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct NewRequest {
    pub target:   ObjectId,
    pub resource: ResourceKind,
    pub kind:     TransferKind,
    pub amount:   u32,
    /// Pickups leave this much in the target; deliveries leave this much
    /// room free.
    pub buffer:   u32,
}

impl NewRequest {
    pub fn pickup(target: ObjectId, resource: ResourceKind, amount: u32) -> Self {
        Self { target, resource, kind: TransferKind::Pickup, amount, buffer: 0 }
    }

    pub fn delivery(target: ObjectId, resource: ResourceKind, amount: u32) -> Self {
        Self { target, resource, kind: TransferKind::Delivery, amount, buffer: 0 }
    }

    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }
}

/// A registered request, owned by the network.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub id:       RequestId,
    pub resource: ResourceKind,
    pub kind:     TransferKind,
    #[serde(rename = "target_id")]
    pub target:   ObjectId,
    /// Amount still to be moved.
    pub amount:   u32,
    pub buffer:   u32,
    /// Tick at which the request expires unfulfilled.
    pub timeout:  Tick,
}

impl TransferRequest {
    /// `true` if both describe the same `(target, resource, kind)`.
    pub fn same_slot(&self, other: &NewRequest) -> bool {
        self.target == other.target && self.resource == other.resource && self.kind == other.kind
    }
}
