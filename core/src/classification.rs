use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Safe,
    Risky,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Safe, Zone::Risky];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Risky => "risky",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe Legal Practices",
            Self::Risky => "Risky Legal Practices",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Zone {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|zone| zone.id() == s)
            .ok_or(GameError::UnknownZone)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableItem {
    pub id: ItemId,
    pub label: String,
    pub emoji: String,
    pub correct_zone: Zone,
}

impl DraggableItem {
    pub fn new(id: ItemId, label: impl Into<String>, emoji: impl Into<String>, correct_zone: Zone) -> Self {
        Self {
            id,
            label: label.into(),
            emoji: emoji.into(),
            correct_zone,
        }
    }
}

/// An item together with the zone it was actually dropped into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item: DraggableItem,
    pub zone: Zone,
}

impl PlacedItem {
    pub fn is_correct(&self) -> bool {
        self.item.correct_zone == self.zone
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DropOutcome {
    AlreadyPlaced,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationEvent {
    Drop { item: ItemId, zone: Zone },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSnapshot {
    pub available: Vec<DraggableItem>,
    pub placed: Vec<PlacedItem>,
    pub score: Points,
    pub complete: bool,
    pub message: Option<Message>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationEngine {
    items: Vec<DraggableItem>,
    placed: Vec<PlacedItem>,
    /// One unit per net correct drop; shown as points.
    units: u32,
    message: Option<Message>,
}

impl ClassificationEngine {
    pub fn new(items: Vec<DraggableItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(GameError::EmptyPuzzle);
        }
        let mut ids = BTreeSet::new();
        if let Some(item) = items.iter().find(|item| !ids.insert(item.id)) {
            return Err(GameError::DuplicateId(item.id));
        }

        Ok(Self {
            items,
            placed: Vec::new(),
            units: 0,
            message: None,
        })
    }

    pub fn available(&self) -> impl Iterator<Item = &DraggableItem> {
        self.items.iter().filter(move |item| !self.is_placed(item.id))
    }

    pub fn placed(&self) -> &[PlacedItem] {
        &self.placed
    }

    pub fn items_in_zone(&self, zone: Zone) -> impl Iterator<Item = &PlacedItem> {
        self.placed.iter().filter(move |placed| placed.zone == zone)
    }

    pub fn is_placed(&self, id: ItemId) -> bool {
        self.placed.iter().any(|placed| placed.item.id == id)
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn drop_item(
        &mut self,
        id: ItemId,
        zone: Zone,
        sink: &mut impl ScoreSink,
    ) -> Result<DropOutcome> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or(GameError::UnknownItem(id))?;

        if self.is_placed(id) {
            self.message = Some(Message::AlreadyPlaced);
            return Ok(DropOutcome::AlreadyPlaced);
        }

        let placed = PlacedItem {
            item: item.clone(),
            zone,
        };
        let outcome = if placed.is_correct() {
            self.units += 1;
            sink.add_points(POINTS_PER_CORRECT);
            self.message = Some(Message::DropCorrect);
            DropOutcome::Correct
        } else {
            self.units = self.units.saturating_sub(1);
            self.message = Some(Message::DropIncorrect);
            DropOutcome::Incorrect
        };
        log::trace!("item {id} dropped into {zone}: {outcome:?}");
        self.placed.push(placed);

        if self.is_complete() {
            log::debug!("classification finished with {} points", self.score());
            self.message = None;
        }
        Ok(outcome)
    }
}

impl ModeEngine for ClassificationEngine {
    type Event = ClassificationEvent;
    type Snapshot = ClassificationSnapshot;

    const MODE: Mode = Mode::Classification;

    fn handle<S: ScoreSink>(&mut self, event: ClassificationEvent, sink: &mut S) -> Result<bool> {
        let ClassificationEvent::Drop { item, zone } = event;
        self.drop_item(item, zone, sink)?;
        Ok(true)
    }

    fn reset(&mut self) {
        self.placed.clear();
        self.units = 0;
        self.message = Some(Message::GameReset);
        log::debug!("classification reset");
    }

    fn is_complete(&self) -> bool {
        self.placed.len() == self.items.len()
    }

    fn score(&self) -> Points {
        self.units.saturating_mul(POINTS_PER_CORRECT)
    }

    fn snapshot(&self) -> ClassificationSnapshot {
        ClassificationSnapshot {
            available: self.available().cloned().collect(),
            placed: self.placed.clone(),
            score: self.score(),
            complete: self.is_complete(),
            message: self.message.clone(),
        }
    }
}
