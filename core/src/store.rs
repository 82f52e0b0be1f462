use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result, Tier, WordId};

/// One catalog entry. Immutable once stored; `frequency` is kept for
/// callers but plays no part in selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: WordId,
    pub text: String,
    pub tier: Tier,
    pub category: String,
    pub frequency: u32,
}

impl WordRecord {
    pub fn new(id: WordId, text: &str, tier: Tier, category: &str, frequency: u32) -> Self {
        Self {
            id,
            text: text.to_ascii_uppercase(),
            tier,
            category: category.to_owned(),
            frequency,
        }
    }
}

/// Catalog shipped with the store: five tiers, five words each, from short
/// common words up to 9-letter ones.
const SEED_CATALOG: &[(WordId, &str, Tier, &str, u32)] = &[
    (1, "HELLO", 1, "common", 100),
    (2, "WORLD", 1, "common", 95),
    (3, "LIGHT", 1, "common", 90),
    (4, "HOUSE", 1, "common", 85),
    (5, "WATER", 1, "nature", 80),
    (6, "PLANET", 2, "science", 70),
    (7, "GARDEN", 2, "nature", 65),
    (8, "FRIEND", 2, "social", 75),
    (9, "BRIDGE", 2, "structure", 60),
    (10, "CAMERA", 2, "technology", 55),
    (11, "MYSTERY", 3, "abstract", 50),
    (12, "JOURNEY", 3, "travel", 45),
    (13, "KITCHEN", 3, "home", 55),
    (14, "PICTURE", 3, "art", 40),
    (15, "PACKAGE", 3, "objects", 35),
    (16, "ELEPHANT", 4, "animals", 30),
    (17, "SANDWICH", 4, "food", 25),
    (18, "COMPUTER", 4, "technology", 40),
    (19, "BIRTHDAY", 4, "celebration", 35),
    (20, "AIRPLANE", 4, "transport", 30),
    (21, "BUTTERFLY", 5, "animals", 20),
    (22, "TELESCOPE", 5, "science", 15),
    (23, "ADVENTURE", 5, "abstract", 25),
    (24, "CHOCOLATE", 5, "food", 30),
    (25, "WONDERFUL", 5, "abstract", 20),
];

/// Word catalog with tier-filtered random retrieval. Built explicitly and
/// handed to the engine, never a process-wide singleton.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordStore {
    words: Vec<WordRecord>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed_catalog() -> Self {
        let mut store = Self::new();
        store.add_words(SEED_CATALOG.iter().map(
            |&(id, text, tier, category, frequency)| {
                WordRecord::new(id, text, tier, category, frequency)
            },
        ));
        store
    }

    /// Appends records to the catalog. Duplicate ids are kept but flagged.
    pub fn add_words<I: IntoIterator<Item = WordRecord>>(&mut self, records: I) {
        for record in records {
            if self.words.iter().any(|existing| existing.id == record.id) {
                log::warn!("duplicate word id {}, keeping both entries", record.id);
            }
            self.words.push(record);
        }
    }

    /// Picks uniformly among words of the requested tier, falling back to
    /// the whole catalog when the tier has no entries.
    pub fn random_word<R: Rng + ?Sized>(&self, tier: Tier, rng: &mut R) -> Result<&WordRecord> {
        let tiered: Vec<&WordRecord> = self
            .words
            .iter()
            .filter(|record| record.tier == tier)
            .collect();
        if let Some(&record) = tiered.choose(rng) {
            return Ok(record);
        }

        if !self.words.is_empty() {
            log::warn!("no words at tier {tier}, falling back to the full catalog");
        }
        self.words.choose(rng).ok_or(GameError::NoWordsAvailable)
    }

    /// Exact category match, in stored order.
    pub fn words_by_category(&self, category: &str) -> Vec<&WordRecord> {
        self.words
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
