//! Agent body parts and their production costs.

/// Largest body an agent may have.
pub const MAX_BODY_PARTS: usize = 50;

/// Ticks of production time per body part.
pub const SPAWN_TICKS_PER_PART: u64 = 3;

/// Carry capacity contributed by each `Carry` part.
pub const CARRY_CAPACITY_PER_PART: u32 = 50;

/// Energy harvested per `Work` part per tick.
pub const HARVEST_POWER: u32 = 2;

/// One segment of an agent's body.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BodyPart {
    Move,
    Work,
    Carry,
    Attack,
    RangedAttack,
    Heal,
    Claim,
    Tough,
}

impl BodyPart {
    /// Production cost in energy.
    #[inline]
    pub fn cost(self) -> u32 {
        match self {
            BodyPart::Move         => 50,
            BodyPart::Work         => 100,
            BodyPart::Carry        => 50,
            BodyPart::Attack       => 80,
            BodyPart::RangedAttack => 150,
            BodyPart::Heal         => 250,
            BodyPart::Claim        => 600,
            BodyPart::Tough        => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyPart::Move         => "move",
            BodyPart::Work         => "work",
            BodyPart::Carry        => "carry",
            BodyPart::Attack       => "attack",
            BodyPart::RangedAttack => "ranged_attack",
            BodyPart::Heal         => "heal",
            BodyPart::Claim        => "claim",
            BodyPart::Tough        => "tough",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total production cost of a body.
pub fn body_cost(body: &[BodyPart]) -> u32 {
    body.iter().map(|p| p.cost()).sum()
}

/// Number of parts of kind `part` in `body`.
pub fn count_parts(body: &[BodyPart], part: BodyPart) -> usize {
    body.iter().filter(|&&p| p == part).count()
}

/// Production time of a body, in ticks.
pub fn spawn_ticks(body: &[BodyPart]) -> u64 {
    body.len() as u64 * SPAWN_TICKS_PER_PART
}
