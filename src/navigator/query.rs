// SPDX-License-Identifier: GPL-3.0

use std::collections::HashMap;

use crate::core::models::{Deck, Stage, Word};

/// A catalog word along with the stage it currently sits in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagedWord<'a> {
    pub word: &'a Word,
    pub stage: Stage,
}

/// Search box text plus an optional stage filter, combined with AND
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WordQuery {
    needle: String,
    stage: Option<Stage>,
}

impl WordQuery {
    pub fn new(text: &str, stage: Option<Stage>) -> Self {
        Self {
            needle: text.to_lowercase(),
            stage,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn matches(&self, word: &Word, stage: Stage) -> bool {
        if self.stage.is_some_and(|s| s != stage) {
            return false;
        }
        word.matches_lowercase(&self.needle)
    }

    pub fn apply<'a>(&self, words: &[StagedWord<'a>]) -> Vec<StagedWord<'a>> {
        words
            .iter()
            .filter(|sw| self.matches(sw.word, sw.stage))
            .copied()
            .collect()
    }
}

/// Every word of the deck grouped by stage (`Unlearned` first), catalog order
/// inside each stage
pub fn staged_words(deck: &Deck) -> Vec<StagedWord<'_>> {
    let stage_by_id: HashMap<&str, Stage> = Stage::ALL
        .into_iter()
        .flat_map(|stage| deck.ids(stage).iter().map(move |id| (id.as_str(), stage)))
        .collect();

    let mut result = Vec::with_capacity(deck.words.len());
    for stage in Stage::ALL {
        result.extend(
            deck.words
                .iter()
                .filter(|w| stage_by_id.get(w.id.as_str()) == Some(&stage))
                .map(|word| StagedWord { word, stage }),
        );
    }
    result
}

/// Checklist ordering: lexicographic by display text. Stable for equal texts.
pub fn sorted_by_text<'a>(words: &[StagedWord<'a>]) -> Vec<StagedWord<'a>> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| a.word.text.cmp(&b.word.text));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        let entries = [
            ("cherry", Some("a red fruit"), Some("체리")),
            ("apple", Some("a fruit"), None),
            ("Banana", None, Some("바나나")),
            ("date", Some("a sweet fruit"), Some("대추야자")),
        ];
        let words = entries
            .iter()
            .enumerate()
            .map(|(index, (text, en, kr))| Word {
                id: Word::id_for_index(index),
                text: text.to_string(),
                slug: text.to_lowercase(),
                meaning_en: en.map(String::from),
                meaning_kr: kr.map(String::from),
            })
            .collect();
        let mut deck = Deck::seed("deck", "Deck", None, words, 0);
        deck.move_words(&["word-3", "word-0"], Stage::Mastered);
        deck
    }

    fn texts(words: &[StagedWord<'_>]) -> Vec<String> {
        words.iter().map(|sw| sw.word.text.clone()).collect()
    }

    #[test]
    fn staged_order_is_stage_then_catalog() {
        let deck = deck();
        let staged = staged_words(&deck);
        // mastered sequence is [date, cherry] but catalog order wins inside a stage
        assert_eq!(texts(&staged), vec!["apple", "Banana", "cherry", "date"]);
        assert_eq!(staged[2].stage, Stage::Mastered);
    }

    #[test]
    fn checklist_order_is_by_text() {
        let deck = deck();
        let sorted = sorted_by_text(&staged_words(&deck));
        assert_eq!(texts(&sorted), vec!["Banana", "apple", "cherry", "date"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let deck = deck();
        let staged = staged_words(&deck);
        assert_eq!(WordQuery::default().apply(&staged).len(), 4);
        assert_eq!(WordQuery::new("", None).apply(&staged).len(), 4);
    }

    #[test]
    fn whitespace_is_part_of_the_needle() {
        let words = [("redo", "do again"), ("bored", "tired")]
            .iter()
            .enumerate()
            .map(|(index, (text, en))| Word {
                id: Word::id_for_index(index),
                text: text.to_string(),
                slug: text.to_string(),
                meaning_en: Some(en.to_string()),
                meaning_kr: None,
            })
            .collect();
        let deck = Deck::seed("deck", "Deck", None, words, 0);
        let staged = staged_words(&deck);

        assert!(WordQuery::new(" red", None).apply(&staged).is_empty());
        assert!(WordQuery::new("  ", None).apply(&staged).is_empty());
        assert_eq!(texts(&WordQuery::new(" ", None).apply(&staged)), vec!["redo"]);
        assert_eq!(texts(&WordQuery::new("red", None).apply(&staged)), vec!["redo", "bored"]);
        assert_eq!(texts(&WordQuery::new("O A", None).apply(&staged)), vec!["redo"]);
    }

    #[test]
    fn text_query_is_case_insensitive_over_translations() {
        let deck = deck();
        let staged = staged_words(&deck);

        assert_eq!(texts(&WordQuery::new("BAN", None).apply(&staged)), vec!["Banana"]);
        assert_eq!(texts(&WordQuery::new("체리", None).apply(&staged)), vec!["cherry"]);
        assert_eq!(
            texts(&WordQuery::new("Fruit", None).apply(&staged)),
            vec!["apple", "cherry", "date"]
        );
    }

    #[test]
    fn stage_and_text_filters_compose() {
        let deck = deck();
        let staged = staged_words(&deck);

        let mastered_fruit = WordQuery::new("fruit", Some(Stage::Mastered));
        assert_eq!(texts(&mastered_fruit.apply(&staged)), vec!["cherry", "date"]);

        let learning = WordQuery::new("", Some(Stage::Learning));
        assert!(learning.apply(&staged).is_empty());
    }
}
