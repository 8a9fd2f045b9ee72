use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::vehicle::VehicleStatus;

/// Draws are taken uniformly from `0..DRAW_RANGE`.
pub const DRAW_RANGE: u32 = 100;
/// A draw below this value fixes the vehicle.
pub const FIX_THRESHOLD: u32 = 75;

/// Verdict of a single repair attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairOutcome {
    Fixed,
    CannotFix,
}

impl RepairOutcome {
    pub fn status(self) -> VehicleStatus {
        match self {
            RepairOutcome::Fixed => VehicleStatus::Fixed,
            RepairOutcome::CannotFix => VehicleStatus::CannotFix,
        }
    }
}

impl fmt::Display for RepairOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.status(), f)
    }
}

pub fn verdict_for_draw(draw: u32) -> RepairOutcome {
    if draw < FIX_THRESHOLD {
        RepairOutcome::Fixed
    } else {
        RepairOutcome::CannotFix
    }
}

/// Decides whether a repair attempt succeeds.
pub trait OutcomeResolver {
    fn resolve(&mut self) -> RepairOutcome;
}

/// Production resolver backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomResolver<R = StdRng> {
    rng: R,
}

impl RandomResolver<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomResolver<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OutcomeResolver for RandomResolver<R> {
    fn resolve(&mut self) -> RepairOutcome {
        let draw = self.rng.random_range(0..DRAW_RANGE);
        verdict_for_draw(draw)
    }
}

/// Always returns the same verdict.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub RepairOutcome);

#[cfg(test)]
impl OutcomeResolver for FixedResolver {
    fn resolve(&mut self) -> RepairOutcome {
        self.0
    }
}

/// Replays a fixed sequence of verdicts, then keeps returning the last one.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedResolver {
    script: std::collections::VecDeque<RepairOutcome>,
    last: RepairOutcome,
}

#[cfg(test)]
impl ScriptedResolver {
    pub fn new(script: impl IntoIterator<Item = RepairOutcome>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: RepairOutcome::Fixed,
        }
    }
}

#[cfg(test)]
impl OutcomeResolver for ScriptedResolver {
    fn resolve(&mut self) -> RepairOutcome {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}
