use std::time::Duration;

use serde::Serialize;

use super::settings::{BonusKind, BonusRule};
use super::timers::{Countdown, Repeating};
use super::types::Cell;

#[derive(Clone, Debug, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
    pub cell: Cell,
    pub value: u32,
    lifespan: Countdown,
    relocation: Option<Repeating>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BonusTimerUpdate {
    pub expired: bool,
    pub relocations: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BonusView {
    pub kind: BonusKind,
    pub cell: Cell,
    pub value: u32,
    pub remaining_ms: u64,
}

impl Bonus {
    pub fn spawn(rule: &BonusRule, cell: Cell) -> Self {
        Self {
            kind: rule.kind,
            cell,
            value: rule.value,
            lifespan: Countdown::new(rule.lifespan()),
            relocation: rule.relocate_every().map(Repeating::new),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.lifespan.remaining()
    }

    /// Feeds elapsed time to the lifespan and relocation timers. Relocations
    /// are not reported for a bonus that expires within the same step.
    pub fn advance(&mut self, dt: Duration) -> BonusTimerUpdate {
        let relocations = self
            .relocation
            .as_mut()
            .map(|timer| timer.advance(dt))
            .unwrap_or(0);
        let expired = self.lifespan.advance(dt);

        BonusTimerUpdate {
            expired,
            relocations: if expired { 0 } else { relocations },
        }
    }

    pub fn view(&self) -> BonusView {
        BonusView {
            kind: self.kind,
            cell: self.cell,
            value: self.value,
            remaining_ms: self.remaining().as_millis() as u64,
        }
    }
}
