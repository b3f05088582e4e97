use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

pub type PairId = u16;

pub type ItemId = u16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: PairId,
    pub term: String,
    pub definition: String,
}

impl Pair {
    pub fn new(id: PairId, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// One clickable card in either column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub id: ItemId,
    pub content: String,
    pub pair_id: PairId,
    pub matched: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TermOutcome {
    NoChange,
    Selected,
    Deselected,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    NoChange,
    Mismatch,
    Matched,
    Completed,
}

impl MatchOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchingEvent {
    SelectTerm(ItemId),
    SelectDefinition(ItemId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchingSnapshot {
    pub terms: Vec<MatchItem>,
    pub definitions: Vec<MatchItem>,
    pub pending: Option<ItemId>,
    pub score: Points,
    pub complete: bool,
    pub message: Option<Message>,
}

/// Term/definition matching with the definitions column shuffled.
///
/// Shuffles come from a [`SmallRng`] seeded at construction, so a given seed always deals the
/// same sequence of boards, including across resets.
#[derive(Clone, Debug)]
pub struct MatchingEngine {
    pairs: Vec<Pair>,
    terms: Vec<MatchItem>,
    definitions: Vec<MatchItem>,
    pending: Option<ItemId>,
    score: Points,
    message: Option<Message>,
    rng: SmallRng,
}

impl MatchingEngine {
    pub fn new(pairs: Vec<Pair>, seed: u64) -> Result<Self> {
        if pairs.is_empty() {
            return Err(GameError::EmptyPuzzle);
        }
        let mut ids = BTreeSet::new();
        if let Some(pair) = pairs.iter().find(|pair| !ids.insert(pair.id)) {
            return Err(GameError::DuplicateId(pair.id));
        }

        let mut engine = Self {
            pairs,
            terms: Vec::new(),
            definitions: Vec::new(),
            pending: None,
            score: 0,
            message: None,
            rng: SmallRng::seed_from_u64(seed),
        };
        engine.deal();
        Ok(engine)
    }

    pub fn terms(&self) -> &[MatchItem] {
        &self.terms
    }

    pub fn definitions(&self) -> &[MatchItem] {
        &self.definitions
    }

    pub fn pending(&self) -> Option<&MatchItem> {
        let id = self.pending?;
        self.terms.iter().find(|term| term.id == id)
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn select_term(&mut self, id: ItemId) -> Result<TermOutcome> {
        let term = find_item(&self.terms, id)?;
        if term.matched {
            return Ok(TermOutcome::NoChange);
        }

        if self.pending == Some(id) {
            self.pending = None;
            return Ok(TermOutcome::Deselected);
        }

        self.pending = Some(id);
        self.message = Some(Message::SelectDefinition);
        log::trace!("term {id} pending");
        Ok(TermOutcome::Selected)
    }

    pub fn select_definition(
        &mut self,
        id: ItemId,
        sink: &mut impl ScoreSink,
    ) -> Result<MatchOutcome> {
        let definition = find_item(&self.definitions, id)?;
        let Some(term_id) = self.pending else {
            return Ok(MatchOutcome::NoChange);
        };
        if definition.matched {
            return Ok(MatchOutcome::NoChange);
        }

        let term_pair = find_item(&self.terms, term_id)?.pair_id;
        let definition_pair = definition.pair_id;
        self.pending = None;

        if term_pair != definition_pair {
            self.message = Some(Message::MatchIncorrect);
            return Ok(MatchOutcome::Mismatch);
        }

        for item in self.terms.iter_mut().filter(|item| item.id == term_id) {
            item.matched = true;
        }
        for item in self.definitions.iter_mut().filter(|item| item.id == id) {
            item.matched = true;
        }
        self.score += POINTS_PER_CORRECT;
        sink.add_points(POINTS_PER_CORRECT);
        self.message = Some(Message::MatchCorrect);
        log::debug!("pair {term_pair} matched");

        Ok(if self.is_complete() {
            MatchOutcome::Completed
        } else {
            MatchOutcome::Matched
        })
    }

    fn deal(&mut self) {
        let mut definitions = items(&self.pairs, |pair| &pair.definition);
        definitions.shuffle(&mut self.rng);

        self.terms = items(&self.pairs, |pair| &pair.term);
        self.definitions = definitions;
    }
}

/// Items in pair order; ids double as the item's index.
fn items(pairs: &[Pair], content: impl Fn(&Pair) -> &String) -> Vec<MatchItem> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| MatchItem {
            id: ItemId::try_from(index).unwrap_or(ItemId::MAX),
            content: content(pair).clone(),
            pair_id: pair.id,
            matched: false,
        })
        .collect()
}

fn find_item(items: &[MatchItem], id: ItemId) -> Result<&MatchItem> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or(GameError::UnknownItem(id))
}

impl ModeEngine for MatchingEngine {
    type Event = MatchingEvent;
    type Snapshot = MatchingSnapshot;

    const MODE: Mode = Mode::Matching;

    fn handle<S: ScoreSink>(&mut self, event: MatchingEvent, sink: &mut S) -> Result<bool> {
        Ok(match event {
            MatchingEvent::SelectTerm(id) => self.select_term(id)? != TermOutcome::NoChange,
            MatchingEvent::SelectDefinition(id) => self.select_definition(id, sink)?.has_update(),
        })
    }

    fn reset(&mut self) {
        self.deal();
        self.pending = None;
        self.score = 0;
        self.message = None;
        log::debug!("matching reset");
    }

    fn is_complete(&self) -> bool {
        self.terms.iter().all(|term| term.matched)
    }

    fn score(&self) -> Points {
        self.score
    }

    fn snapshot(&self) -> MatchingSnapshot {
        MatchingSnapshot {
            terms: self.terms.clone(),
            definitions: self.definitions.clone(),
            pending: self.pending,
            score: self.score,
            complete: self.is_complete(),
            message: self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pairs() -> Vec<Pair> {
        vec![
            Pair::new(0, "TORT", "A wrongful act causing civil liability."),
            Pair::new(1, "DEED", "A legal document that transfers property ownership."),
            Pair::new(2, "LIEN", "A legal claim on property as security for a debt."),
            Pair::new(3, "LEASE", "A contract to rent property."),
            Pair::new(4, "LOAN", "A sum of money lent at interest."),
        ]
    }

    fn definition_for(engine: &MatchingEngine, pair_id: PairId) -> ItemId {
        engine
            .definitions()
            .iter()
            .find(|item| item.pair_id == pair_id)
            .unwrap()
            .id
    }

    fn wrong_definition_for(engine: &MatchingEngine, pair_id: PairId) -> ItemId {
        engine
            .definitions()
            .iter()
            .find(|item| item.pair_id != pair_id)
            .unwrap()
            .id
    }

    fn sorted_contents(items: &[MatchItem]) -> Vec<String> {
        let mut contents: Vec<String> = items.iter().map(|item| item.content.clone()).collect();
        contents.sort();
        contents
    }

    #[test]
    fn definitions_are_a_permutation() {
        for seed in 0..32 {
            let engine = MatchingEngine::new(pairs(), seed).unwrap();
            let mut canonical: Vec<String> = pairs().into_iter().map(|pair| pair.definition).collect();
            canonical.sort();

            assert_eq!(engine.definitions().len(), pairs().len());
            assert_eq!(sorted_contents(engine.definitions()), canonical);
            let terms: Vec<&str> = engine.terms().iter().map(|t| t.content.as_str()).collect();
            assert_eq!(terms, ["TORT", "DEED", "LIEN", "LEASE", "LOAN"]);
        }
    }

    #[test]
    fn same_seed_deals_same_board() {
        let a = MatchingEngine::new(pairs(), 7).unwrap();
        let b = MatchingEngine::new(pairs(), 7).unwrap();

        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn correct_pair_matches_two_items() {
        let mut engine = MatchingEngine::new(pairs(), 1).unwrap();
        let mut ledger = ScoreLedger::new();
        let definition = definition_for(&engine, 3);

        assert_eq!(engine.select_term(3).unwrap(), TermOutcome::Selected);
        assert_eq!(engine.message(), Some(&Message::SelectDefinition));
        assert_eq!(
            engine.select_definition(definition, &mut ledger).unwrap(),
            MatchOutcome::Matched
        );

        let matched = engine.terms().iter().chain(engine.definitions()).filter(|i| i.matched);
        assert_eq!(matched.count(), 2);
        assert_eq!(engine.score(), 10);
        assert_eq!(ledger.total(), 10);
        assert!(engine.pending().is_none());
    }

    #[test]
    fn mismatch_clears_pending_without_matching() {
        let mut engine = MatchingEngine::new(pairs(), 2).unwrap();
        let mut ledger = ScoreLedger::new();
        let wrong = wrong_definition_for(&engine, 0);

        engine.select_term(0).unwrap();
        assert_eq!(
            engine.select_definition(wrong, &mut ledger).unwrap(),
            MatchOutcome::Mismatch
        );

        assert!(engine.terms().iter().chain(engine.definitions()).all(|i| !i.matched));
        assert!(engine.pending().is_none());
        assert_eq!(engine.score(), 0);
        assert_eq!(ledger.total(), 0);
        assert_eq!(engine.message(), Some(&Message::MatchIncorrect));
    }

    #[test]
    fn definition_without_pending_term_is_ignored() {
        let mut engine = MatchingEngine::new(pairs(), 3).unwrap();
        let mut ledger = ScoreLedger::new();
        let definition = definition_for(&engine, 0);

        assert_eq!(
            engine.select_definition(definition, &mut ledger).unwrap(),
            MatchOutcome::NoChange
        );
        assert_eq!(engine.message(), None);
        assert_eq!(engine.select_definition(99, &mut ledger), Err(GameError::UnknownItem(99)));
    }

    #[test]
    fn reselecting_term_toggles_it_off() {
        let mut engine = MatchingEngine::new(pairs(), 4).unwrap();

        engine.select_term(1).unwrap();
        assert_eq!(engine.select_term(2).unwrap(), TermOutcome::Selected);
        assert_eq!(engine.pending().map(|t| t.id), Some(2));
        assert_eq!(engine.select_term(2).unwrap(), TermOutcome::Deselected);
        assert!(engine.pending().is_none());
    }

    #[test]
    fn matched_items_cannot_be_reused() {
        let mut engine = MatchingEngine::new(pairs(), 5).unwrap();
        let mut ledger = ScoreLedger::new();
        let definition = definition_for(&engine, 1);

        engine.select_term(1).unwrap();
        engine.select_definition(definition, &mut ledger).unwrap();

        assert_eq!(engine.select_term(1).unwrap(), TermOutcome::NoChange);
        engine.select_term(0).unwrap();
        assert_eq!(
            engine.select_definition(definition, &mut ledger).unwrap(),
            MatchOutcome::NoChange
        );
        assert_eq!(ledger.total(), 10);
    }

    #[test]
    fn matching_every_pair_completes() {
        let mut engine = MatchingEngine::new(pairs(), 6).unwrap();
        let mut ledger = ScoreLedger::new();

        let mut last = MatchOutcome::NoChange;
        for pair in pairs() {
            let definition = definition_for(&engine, pair.id);
            engine.select_term(pair.id).unwrap();
            last = engine.select_definition(definition, &mut ledger).unwrap();
        }

        assert_eq!(last, MatchOutcome::Completed);
        assert!(engine.is_complete());
        assert_eq!(engine.score(), 50);
    }

    fn definition_order(engine: &MatchingEngine) -> Vec<PairId> {
        engine.definitions().iter().map(|item| item.pair_id).collect()
    }

    #[test]
    fn reset_reshuffles_and_clears_progress() {
        let pairs = PuzzleSet::default().pairs;
        let mut canonical: Vec<String> = pairs.iter().map(|pair| pair.definition.clone()).collect();
        canonical.sort();
        let mut engine = MatchingEngine::new(pairs, 8).unwrap();
        let mut ledger = ScoreLedger::new();
        let definition = definition_for(&engine, 2);
        engine.select_term(2).unwrap();
        engine.select_definition(definition, &mut ledger).unwrap();
        engine.select_term(4).unwrap();
        let before = definition_order(&engine);

        engine.reset();

        assert!(engine.terms().iter().chain(engine.definitions()).all(|i| !i.matched));
        assert!(engine.pending().is_none());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.message(), None);
        assert_eq!(sorted_contents(engine.definitions()), canonical);
        assert_ne!(definition_order(&engine), before);
        assert_eq!(ledger.total(), 10);
    }

    #[test]
    fn construction_rejects_bad_pairs() {
        assert!(matches!(
            MatchingEngine::new(Vec::new(), 0),
            Err(GameError::EmptyPuzzle)
        ));

        let mut duplicated = pairs();
        duplicated[4].id = 0;
        assert!(matches!(
            MatchingEngine::new(duplicated, 0),
            Err(GameError::DuplicateId(0))
        ));
    }
}
