//! Body specifications and manifest sizing.
//!
//! A `BodySpec` is a named part ratio.  Its manifest for a given energy
//! budget repeats the ratio as many times as the budget, the 50-part limit
//! and `max_units` allow.

use hive_core::{BodyPart, MAX_BODY_PARTS, body_cost};

/// Limits applied when sizing a body.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BodyOptions {
    /// Largest number of ratio repetitions.
    pub max_units:    Option<usize>,
    /// Never spend more than this, whatever the facility holds.
    pub energy_limit: Option<u32>,
    /// When set, `Move` parts in the ratio are ignored and one `Move` is
    /// added per this many other parts (rounded up).
    pub move_ratio:   Option<usize>,
}

/// A named body shape.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BodySpec {
    pub name:    String,
    pub ratio:   Vec<BodyPart>,
    pub options: BodyOptions,
}

impl BodySpec {
    pub fn new(name: impl Into<String>, ratio: Vec<BodyPart>) -> Self {
        Self { name: name.into(), ratio, options: BodyOptions::default() }
    }

    pub fn with_options(mut self, options: BodyOptions) -> Self {
        self.options = options;
        self
    }

    /// Cost of the smallest body this spec produces.
    pub fn min_cost(&self) -> u32 {
        body_cost(&self.build(1))
    }

    /// The largest body affordable with `energy`.
    ///
    /// Always holds at least one unit, so a request for an unaffordable
    /// body waits in the queue for energy instead of vanishing.
    pub fn manifest(&self, energy: u32) -> Vec<BodyPart> {
        if self.ratio.is_empty() {
            return vec![];
        }
        let budget = self.options.energy_limit.map_or(energy, |limit| limit.min(energy));
        let max_units = self.options.max_units.unwrap_or(usize::MAX).max(1);

        let mut best = self.build(1);
        let mut units = 2;
        while units <= max_units {
            let body = self.build(units);
            if body.len() > MAX_BODY_PARTS || body_cost(&body) > budget {
                break;
            }
            best = body;
            units += 1;
        }
        best
    }

    fn build(&self, units: usize) -> Vec<BodyPart> {
        let Some(per_move) = self.options.move_ratio else {
            return self.ratio.repeat(units);
        };
        let core: Vec<BodyPart> = self.ratio.iter().copied().filter(|&p| p != BodyPart::Move).collect();
        let mut body = core.repeat(units);
        let moves = body.len().div_ceil(per_move.max(1));
        body.extend(std::iter::repeat_n(BodyPart::Move, moves));
        body
    }
}
