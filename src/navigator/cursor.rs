// SPDX-License-Identifier: GPL-3.0

use std::collections::HashMap;
use std::ops::Range;

use log::debug;

use super::window::{self, Slide};

/// Which swiper an event comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The vertical swiper over the words
    Word,
    /// The horizontal swiper over the media of one word
    Media,
}

/// A settled swipe reported by one of the swipers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeEvent {
    pub axis: Axis,
    pub index: usize,
    /// Word slide owning the swiper. Only meaningful for [`Axis::Media`].
    pub source_word_index: usize,
}

impl SwipeEvent {
    pub fn word(index: usize) -> Self {
        Self {
            axis: Axis::Word,
            index,
            source_word_index: index,
        }
    }

    pub fn media(source_word_index: usize, index: usize) -> Self {
        Self {
            axis: Axis::Media,
            index,
            source_word_index,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub word_index: usize,
    pub media_index: usize,
}

/// What the caller should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The event was ignored or changed nothing
    None,
    /// The position changed
    Moved(Position),
    /// The position changed to a pair that has not been pronounced yet
    Pronounce(Position),
}

/// Cursor over the word axis and, within the current word, the media axis
#[derive(Debug, Default)]
pub struct Navigator {
    word_count: usize,
    position: Position,
    media_counts: HashMap<usize, usize>,
    last_pronounced: Option<Position>,
}

impl Navigator {
    pub fn new(word_count: usize) -> Self {
        Self {
            word_count,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn word_index(&self) -> usize {
        self.position.word_index
    }

    pub fn media_index(&self) -> usize {
        self.position.media_index
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Point the cursor at a new word list. Known media counts are dropped since
    /// indices may now refer to other words.
    pub fn set_word_count(&mut self, word_count: usize) {
        self.word_count = word_count;
        self.media_counts.clear();

        let last = word_count.saturating_sub(1);
        if self.position.word_index > last {
            self.position = Position {
                word_index: last,
                media_index: 0,
            };
        }
    }

    /// Register how many media the word at `word_index` has, once they are known
    pub fn set_media_count(&mut self, word_index: usize, media_count: usize) {
        self.media_counts.insert(word_index, media_count);

        if word_index == self.position.word_index
            && self.position.media_index >= media_count.max(1)
        {
            self.position.media_index = media_count.saturating_sub(1);
        }
    }

    pub fn media_count(&self, word_index: usize) -> Option<usize> {
        self.media_counts.get(&word_index).copied()
    }

    /// Words that get a live media swiper
    pub fn live_range(&self) -> Range<usize> {
        window::live_range(self.position.word_index, self.word_count)
    }

    pub fn slide(&self, word_index: usize) -> Slide {
        window::slide(word_index, self.position.word_index, self.word_count)
    }

    pub fn update(&mut self, event: SwipeEvent) -> Action {
        match event.axis {
            Axis::Word => {
                if self.word_count == 0 {
                    return Action::None;
                }

                let word_index = event.index.min(self.word_count - 1);
                if word_index == self.position.word_index {
                    return Action::None;
                }

                self.position = Position {
                    word_index,
                    media_index: 0,
                };
            }
            Axis::Media => {
                if event.source_word_index != self.position.word_index {
                    debug!(
                        "navigator: ignoring media swipe from inactive word {} (active {})",
                        event.source_word_index, self.position.word_index
                    );
                    return Action::None;
                }

                let media_index = match self.media_count(self.position.word_index) {
                    Some(0) => return Action::None,
                    Some(count) => event.index.min(count - 1),
                    None => event.index,
                };
                if media_index == self.position.media_index {
                    return Action::None;
                }

                self.position.media_index = media_index;
            }
        }

        self.settle()
    }

    fn settle(&mut self) -> Action {
        if self.last_pronounced == Some(self.position) {
            return Action::Moved(self.position);
        }

        self.last_pronounced = Some(self.position);
        Action::Pronounce(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_change_resets_media() {
        let mut nav = Navigator::new(10);
        nav.update(SwipeEvent::media(0, 3));
        assert_eq!(nav.media_index(), 3);

        nav.update(SwipeEvent::word(4));
        assert_eq!(nav.position(), Position { word_index: 4, media_index: 0 });

        nav.update(SwipeEvent::media(4, 2));
        nav.update(SwipeEvent::word(3));
        assert_eq!(nav.position(), Position { word_index: 3, media_index: 0 });
    }

    #[test]
    fn media_events_from_inactive_words_are_ignored() {
        let mut nav = Navigator::new(5);
        nav.update(SwipeEvent::word(2));

        assert_eq!(nav.update(SwipeEvent::media(1, 4)), Action::None);
        assert_eq!(nav.update(SwipeEvent::media(3, 4)), Action::None);
        assert_eq!(nav.media_index(), 0);

        assert!(matches!(nav.update(SwipeEvent::media(2, 1)), Action::Pronounce(_)));
        assert_eq!(nav.media_index(), 1);
    }

    #[test]
    fn pronunciation_is_deduplicated_per_pair() {
        let mut nav = Navigator::new(3);

        let first = Position { word_index: 0, media_index: 1 };
        assert_eq!(nav.update(SwipeEvent::media(0, 1)), Action::Pronounce(first));
        assert_eq!(nav.update(SwipeEvent::media(0, 1)), Action::None);

        let back = Position { word_index: 0, media_index: 0 };
        assert_eq!(nav.update(SwipeEvent::media(0, 0)), Action::Pronounce(back));
        assert_eq!(nav.update(SwipeEvent::media(0, 1)), Action::Pronounce(first));
    }

    #[test]
    fn indices_are_clamped() {
        let mut nav = Navigator::new(3);
        nav.update(SwipeEvent::word(99));
        assert_eq!(nav.word_index(), 2);

        nav.set_media_count(2, 4);
        nav.update(SwipeEvent::media(2, 10));
        assert_eq!(nav.media_index(), 3);

        nav.set_media_count(2, 2);
        assert_eq!(nav.media_index(), 1);

        nav.set_media_count(2, 0);
        assert_eq!(nav.update(SwipeEvent::media(2, 1)), Action::None);
    }

    #[test]
    fn empty_deck_ignores_word_swipes() {
        let mut nav = Navigator::new(0);
        assert_eq!(nav.update(SwipeEvent::word(1)), Action::None);
        assert!(nav.live_range().is_empty());
    }

    #[test]
    fn shrinking_the_word_list_clamps_the_cursor() {
        let mut nav = Navigator::new(10);
        nav.update(SwipeEvent::word(8));
        nav.update(SwipeEvent::media(8, 2));
        nav.set_media_count(8, 5);

        nav.set_word_count(4);
        assert_eq!(nav.position(), Position { word_index: 3, media_index: 0 });
        assert_eq!(nav.media_count(8), None);
    }

    #[test]
    fn at_most_three_live_slides_in_a_large_deck() {
        let mut nav = Navigator::new(10_000);

        for target in [0, 1, 5_000, 9_998, 9_999, 42] {
            nav.update(SwipeEvent::word(target));
            let live = (0..nav.word_count())
                .filter(|i| nav.slide(*i) == Slide::Live)
                .count();
            assert!(live <= 3, "{live} live slides at {target}");
            assert_eq!(live, nav.live_range().len());
            assert_eq!(nav.slide(nav.word_index()), Slide::Live);
        }
    }
}
