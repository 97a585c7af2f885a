//! Resource kinds and the `Store` container shared by agents, structures and
//! projected route-plan states.

use std::collections::BTreeMap;

/// A transferable resource.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceKind {
    #[default]
    Energy,
    Power,
    Hydrogen,
    Oxygen,
}

impl ResourceKind {
    /// Lowercase label, used in logs and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Energy   => "energy",
            ResourceKind::Power    => "power",
            ResourceKind::Hydrogen => "hydrogen",
            ResourceKind::Oxygen   => "oxygen",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// A resource container with one shared capacity across all kinds.
///
/// Zero amounts are never stored, so two stores holding the same resources
/// compare equal regardless of how they got there.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Store {
    pub capacity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    amounts: BTreeMap<ResourceKind, u32>,
}

impl Store {
    pub fn with_capacity(capacity: u32) -> Self {
        Self { capacity, amounts: BTreeMap::new() }
    }

    /// Builder-style helper: set `resource` to `amount` (clamped to capacity).
    pub fn with(mut self, resource: ResourceKind, amount: u32) -> Self {
        self.set(resource, amount);
        self
    }

    #[inline]
    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// Total of all resources held.
    pub fn used(&self) -> u32 {
        self.amounts.values().sum()
    }

    /// Remaining room across all resource kinds.
    #[inline]
    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.used())
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.free_capacity() == 0
    }

    /// Overwrite the amount of `resource`, clamped so the store never exceeds
    /// its capacity.
    pub fn set(&mut self, resource: ResourceKind, amount: u32) {
        let others = self.used() - self.get(resource);
        let amount = amount.min(self.capacity.saturating_sub(others));
        if amount == 0 {
            self.amounts.remove(&resource);
        } else {
            self.amounts.insert(resource, amount);
        }
    }

    /// Add up to `amount`; returns how much actually fit.
    pub fn add(&mut self, resource: ResourceKind, amount: u32) -> u32 {
        let moved = amount.min(self.free_capacity());
        if moved > 0 {
            *self.amounts.entry(resource).or_insert(0) += moved;
        }
        moved
    }

    /// Remove up to `amount`; returns how much was actually taken.
    pub fn remove(&mut self, resource: ResourceKind, amount: u32) -> u32 {
        let held = self.get(resource);
        let moved = amount.min(held);
        if moved == held {
            self.amounts.remove(&resource);
        } else {
            self.amounts.insert(resource, held - moved);
        }
        moved
    }

    /// Apply a signed delta without capacity clamping.
    ///
    /// Used for projected states, where the caller has already bounded the
    /// delta.  Negative results floor at zero.
    pub fn apply_delta(&mut self, resource: ResourceKind, delta: i64) {
        let next = (self.get(resource) as i64 + delta).max(0) as u32;
        if next == 0 {
            self.amounts.remove(&resource);
        } else {
            self.amounts.insert(resource, next);
        }
    }

    /// Iterator over `(resource, amount)` pairs with non-zero amounts.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.amounts.iter().map(|(&k, &v)| (k, v))
    }
}
