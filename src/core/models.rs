// SPDX-License-Identifier: GPL-3.0

pub mod deck;
pub mod word;

pub use deck::{Deck, DeckStats, Stage};
pub use word::{MediaItem, Word, WordDetail, media_url};
