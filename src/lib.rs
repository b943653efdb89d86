// SPDX-License-Identifier: GPL-3.0

//! Vocabulary decks split into three memorization stages, plus the cursor and
//! windowing logic the swipeable and list views are built on.

pub mod cli;
pub mod config;
pub mod core;
pub mod navigator;
pub mod store;

pub use crate::core::errors::{CatalogError, PersistenceError, StoreError};
pub use crate::core::models::{Deck, DeckStats, MediaItem, Stage, Word, WordDetail};
pub use crate::store::{DeckSeed, DeckStore};
