// SPDX-License-Identifier: GPL-3.0

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::word::Word;

/// The memorization stage a word is in. Ordered `Unlearned < Learning < Mastered`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Unlearned,
    Learning,
    Mastered,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Stage::Unlearned => write!(f, "unlearned"),
            Stage::Learning => write!(f, "learning"),
            Stage::Mastered => write!(f, "mastered"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unlearned" => Ok(Stage::Unlearned),
            "learning" => Ok(Stage::Learning),
            "mastered" => Ok(Stage::Mastered),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Unlearned, Stage::Learning, Stage::Mastered];

    /// The stage one step to the right, if any
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Unlearned => Some(Stage::Learning),
            Stage::Learning => Some(Stage::Mastered),
            Stage::Mastered => None,
        }
    }

    /// The stage one step to the left, if any
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Unlearned => None,
            Stage::Learning => Some(Stage::Unlearned),
            Stage::Mastered => Some(Stage::Learning),
        }
    }

    /// Label shown by the korean front-end
    pub fn label(self) -> &'static str {
        match self {
            Stage::Unlearned => "미암기",
            Stage::Learning => "암기중",
            Stage::Mastered => "완료",
        }
    }
}

/// A named catalog of words and the stage partition of that catalog.
///
/// Every catalog word id lives in exactly one of the three stage sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub words: Vec<Word>,
    pub unlearned: Vec<String>,
    pub learning: Vec<String>,
    pub mastered: Vec<String>,
    /// Milliseconds since epoch
    pub created_at: i64,
    /// Milliseconds since epoch
    pub updated_at: i64,
}

impl Deck {
    /// Creates a deck with every word of `words` in [`Stage::Unlearned`]
    pub fn seed(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        words: Vec<Word>,
        now: i64,
    ) -> Self {
        let unlearned = words.iter().map(|w| w.id.clone()).collect();
        Self {
            id: id.into(),
            name: name.into(),
            description,
            words,
            unlearned,
            learning: Vec::new(),
            mastered: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn ids(&self, stage: Stage) -> &[String] {
        match stage {
            Stage::Unlearned => &self.unlearned,
            Stage::Learning => &self.learning,
            Stage::Mastered => &self.mastered,
        }
    }

    fn ids_mut(&mut self, stage: Stage) -> &mut Vec<String> {
        match stage {
            Stage::Unlearned => &mut self.unlearned,
            Stage::Learning => &mut self.learning,
            Stage::Mastered => &mut self.mastered,
        }
    }

    pub fn word(&self, word_id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == word_id)
    }

    pub fn contains(&self, word_id: &str) -> bool {
        self.words.iter().any(|w| w.id == word_id)
    }

    /// Stage currently holding `word_id`
    pub fn stage_of(&self, word_id: &str) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.ids(*stage).iter().any(|id| id == word_id))
    }

    /// Words of `stage` in that stage's sequence order
    pub fn words_in(&self, stage: Stage) -> Vec<&Word> {
        let by_id: HashMap<&str, &Word> =
            self.words.iter().map(|w| (w.id.as_str(), w)).collect();
        self.ids(stage)
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect()
    }

    /// Removes every given id from all three sequences, then appends them to `target`.
    ///
    /// Ids absent from the catalog are skipped and repeated ids collapse into one,
    /// so the partition holds whatever the input. Returns how many ids were moved,
    /// which is 0 when the ids already sit at the end of `target` in that order.
    pub fn move_words<S: AsRef<str>>(&mut self, word_ids: &[S], target: Stage) -> usize {
        let catalog: HashSet<&str> = self.words.iter().map(|w| w.id.as_str()).collect();
        let mut seen = HashSet::new();
        let moving: Vec<String> = word_ids
            .iter()
            .map(<S as AsRef<str>>::as_ref)
            .filter(|id| catalog.contains(id) && seen.insert(*id))
            .map(String::from)
            .collect();

        if moving.is_empty() || self.ids(target).ends_with(&moving) {
            return 0;
        }

        let moving_set: HashSet<&str> = moving.iter().map(String::as_str).collect();
        for stage in Stage::ALL {
            self.ids_mut(stage)
                .retain(|id| !moving_set.contains(id.as_str()));
        }

        let count = moving.len();
        self.ids_mut(target).extend(moving);
        count
    }

    /// Swaps the catalog and puts every new word back into [`Stage::Unlearned`]
    pub fn replace_catalog(&mut self, words: Vec<Word>) {
        self.unlearned = words.iter().map(|w| w.id.clone()).collect();
        self.learning.clear();
        self.mastered.clear();
        self.words = words;
    }

    /// Checks that the three sequences partition the catalog exactly
    pub fn is_partitioned(&self) -> bool {
        let catalog: HashSet<&str> = self.words.iter().map(|w| w.id.as_str()).collect();
        let mut seen = HashSet::new();

        for stage in Stage::ALL {
            for id in self.ids(stage) {
                if !catalog.contains(id.as_str()) || !seen.insert(id.as_str()) {
                    return false;
                }
            }
        }

        seen.len() == catalog.len()
    }

    /// Get the serialized ron of the [`Deck`], stored as an opaque document
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::to_string(self)
    }

    /// Get the [`Deck`] from a ron string
    pub fn from_ron(ron: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(ron)
    }

    pub fn stats(&self) -> DeckStats {
        DeckStats::new(
            self.words.len(),
            self.unlearned.len(),
            self.learning.len(),
            self.mastered.len(),
        )
    }
}

/// Counts and rounded percentages of a [`Deck`] partition. Never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckStats {
    pub total: usize,
    pub unlearned: usize,
    pub learning: usize,
    pub mastered: usize,
    pub unlearned_percent: u32,
    pub learning_percent: u32,
    pub mastered_percent: u32,
}

impl DeckStats {
    pub fn new(total: usize, unlearned: usize, learning: usize, mastered: usize) -> Self {
        Self {
            total,
            unlearned,
            learning,
            mastered,
            unlearned_percent: percent(unlearned, total),
            learning_percent: percent(learning, total),
            mastered_percent: percent(mastered, total),
        }
    }

    pub fn count(&self, stage: Stage) -> usize {
        match stage {
            Stage::Unlearned => self.unlearned,
            Stage::Learning => self.learning,
            Stage::Mastered => self.mastered,
        }
    }

    pub fn percent(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Unlearned => self.unlearned_percent,
            Stage::Learning => self.learning_percent,
            Stage::Mastered => self.mastered_percent,
        }
    }
}

/// `count / total * 100` rounded half up, 0 for an empty deck.
/// Each stage is rounded on its own so the three may not add up to 100.
fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as u64 * 200 + total as u64) / (total as u64 * 2)) as u32
}
