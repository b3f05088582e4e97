use alloc::collections::BTreeSet;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUp {
    SecondChance,
    Hint,
}

impl PowerUp {
    pub const ALL: [PowerUp; 2] = [PowerUp::SecondChance, PowerUp::Hint];

    pub const fn id(self) -> &'static str {
        match self {
            Self::SecondChance => "second-chance",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PowerUp {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|power_up| power_up.id() == s)
            .ok_or(GameError::UnknownPowerUp)
    }
}

/// Receiver of score changes produced by a mode engine.
///
/// Engines never hand out negative amounts: penalties only lower their own local score.
pub trait ScoreSink {
    fn add_points(&mut self, amount: Points);

    /// Unlocking is idempotent. No engine transition currently calls this.
    fn unlock_power_up(&mut self, power_up: PowerUp);
}

/// Session-wide points and power-ups, outliving individual engines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    total: Points,
    power_ups: BTreeSet<PowerUp>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Points {
        self.total
    }

    pub fn is_unlocked(&self, power_up: PowerUp) -> bool {
        self.power_ups.contains(&power_up)
    }

    pub fn power_ups(&self) -> impl Iterator<Item = PowerUp> + '_ {
        self.power_ups.iter().copied()
    }
}

impl ScoreSink for ScoreLedger {
    fn add_points(&mut self, amount: Points) {
        self.total = self.total.saturating_add(amount);
        log::trace!("ledger +{amount} -> {}", self.total);
    }

    fn unlock_power_up(&mut self, power_up: PowerUp) {
        if self.power_ups.insert(power_up) {
            log::debug!("power-up unlocked: {power_up}");
        }
    }
}
