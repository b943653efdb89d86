// SPDX-License-Identifier: GPL-3.0

//! The deck store: single source of truth for the decks, the selected deck and
//! stage, and every stage transition.
//!
//! Mutations write the whole deck to the repository first and only then swap the
//! in-memory copy, so readers always see a state that was persisted. Mutations
//! queue behind one another; reads never wait on them.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};

use crate::core::catalog::CatalogSource;
use crate::core::database::DeckRepository;
use crate::core::errors::{Result, StoreError};
use crate::core::models::{Deck, DeckStats, Stage, Word};

/// Identity of the deck created on first run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSeed {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Default for DeckSeed {
    fn default() -> Self {
        Self {
            id: String::from("default-deck"),
            name: String::from("기본 영단어"),
            description: Some(String::from("Word Shorts 기본 단어장")),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    decks: Vec<Arc<Deck>>,
    current_deck_id: Option<String>,
    current_stage: Stage,
    initialized: bool,
    loading: bool,
}

impl State {
    fn deck(&self, deck_id: &str) -> Option<&Arc<Deck>> {
        self.decks.iter().find(|d| d.id == deck_id)
    }
}

pub struct DeckStore<R, C> {
    repository: R,
    catalog: C,
    seed: DeckSeed,
    state: RwLock<State>,
    /// Held for the whole read-modify-write of a mutation
    writer: Mutex<()>,
    version: watch::Sender<u64>,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl<R, C> DeckStore<R, C>
where
    R: DeckRepository,
    C: CatalogSource,
{
    pub fn new(repository: R, catalog: C, seed: DeckSeed) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            repository,
            catalog,
            seed,
            state: RwLock::new(State::default()),
            writer: Mutex::new(()),
            version,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` in one step and notifies subscribers
    fn commit(&self, change: impl FnOnce(&mut State)) {
        {
            let mut state: RwLockWriteGuard<'_, State> =
                self.state.write().unwrap_or_else(PoisonError::into_inner);
            change(&mut state);
        }
        self.version.send_modify(|v| *v += 1);
    }

    fn commit_deck(&self, deck: Deck) {
        self.commit(|state| {
            if let Some(slot) = state.decks.iter_mut().find(|d| d.id == deck.id) {
                *slot = Arc::new(deck);
            }
            state.loading = false;
        });
    }

    /// Loads the persisted decks, seeding the default deck from the catalog when
    /// there are none. Calling it again once initialized does nothing.
    ///
    /// On failure the store still ends up initialized, just without decks.
    pub async fn bootstrap(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        if self.read().initialized {
            return Ok(());
        }

        self.commit(|state| state.loading = true);

        match self.load_or_seed().await {
            Ok(decks) => {
                self.commit(|state| {
                    state.current_deck_id = decks.first().map(|d| d.id.clone());
                    state.decks = decks.into_iter().map(Arc::new).collect();
                    state.initialized = true;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize decks: {e}");
                self.commit(|state| {
                    state.decks.clear();
                    state.current_deck_id = None;
                    state.initialized = true;
                    state.loading = false;
                });
                Err(e)
            }
        }
    }

    async fn load_or_seed(&self) -> Result<Vec<Deck>> {
        let decks = self.repository.get_all().await?;
        if !decks.is_empty() {
            info!("Loaded {} deck(s) from the database", decks.len());
            return Ok(decks);
        }

        info!("No decks found, fetching the vocab catalog");
        let words = self.catalog.load_catalog().await?;
        let deck = Deck::seed(
            self.seed.id.clone(),
            self.seed.name.clone(),
            self.seed.description.clone(),
            words,
            now_millis(),
        );

        self.repository.put(&deck).await?;
        info!("Created default deck with {} words", deck.words.len());

        Ok(vec![deck])
    }

    /// Selects `deck_id`. Unknown ids are ignored and keep the previous selection.
    pub fn select_deck(&self, deck_id: &str) -> bool {
        if self.read().deck(deck_id).is_none() {
            warn!("Ignoring selection of unknown deck {deck_id}");
            return false;
        }

        self.commit(|state| state.current_deck_id = Some(deck_id.to_string()));
        true
    }

    pub fn select_stage(&self, stage: Stage) {
        self.commit(|state| state.current_stage = stage);
    }

    pub fn current_stage(&self) -> Stage {
        self.read().current_stage
    }

    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn decks(&self) -> Vec<Arc<Deck>> {
        self.read().decks.clone()
    }

    pub fn deck(&self, deck_id: &str) -> Option<Arc<Deck>> {
        self.read().deck(deck_id).cloned()
    }

    pub fn current_deck(&self) -> Option<Arc<Deck>> {
        let state = self.read();
        state
            .current_deck_id
            .as_deref()
            .and_then(|id| state.deck(id))
            .cloned()
    }

    /// Words of the selected stage of the selected deck, in stage order
    pub fn current_words(&self) -> Vec<Word> {
        let stage = self.current_stage();
        self.current_deck()
            .map(|deck| deck.words_in(stage).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Stats of `deck_id`, or of the selected deck. Recomputed on every call.
    pub fn deck_stats(&self, deck_id: Option<&str>) -> Option<DeckStats> {
        let deck = match deck_id {
            Some(id) => self.deck(id),
            None => self.current_deck(),
        };
        deck.map(|d| d.stats())
    }

    /// Moves one word of the selected deck to `target`
    pub async fn move_word(&self, word_id: &str, target: Stage) -> Result<()> {
        self.move_words(&[word_id], target).await
    }

    /// Moves several words of the selected deck to `target` with a single write.
    /// Does nothing when no deck is selected.
    pub async fn move_words<S: AsRef<str>>(&self, word_ids: &[S], target: Stage) -> Result<()> {
        let _guard = self.writer.lock().await;
        let Some(current) = self.current_deck() else {
            return Ok(());
        };

        let mut deck = Deck::clone(&current);
        let moved = deck.move_words(word_ids, target);
        if moved == 0 {
            debug!("Nothing to move in deck {}", deck.id);
            return Ok(());
        }

        deck.updated_at = now_millis();
        self.repository.put(&deck).await?;

        debug!("Moved {moved} word(s) of deck {} to {target}", deck.id);
        self.commit_deck(deck);
        Ok(())
    }

    /// Refetches the catalog of `deck_id` and puts every word back into
    /// [`Stage::Unlearned`]. Prior stage placement is discarded.
    pub async fn refresh_deck(&self, deck_id: &str) -> Result<()> {
        let _guard = self.writer.lock().await;
        let Some(existing) = self.deck(deck_id) else {
            return Err(StoreError::UnknownDeck(deck_id.to_string()));
        };

        self.commit(|state| state.loading = true);

        let refreshed = async {
            let words = self.catalog.load_catalog().await?;
            let mut deck = Deck::clone(&existing);
            deck.replace_catalog(words);
            deck.updated_at = now_millis();
            self.repository.put(&deck).await?;
            Ok::<_, StoreError>(deck)
        }
        .await;

        match refreshed {
            Ok(deck) => {
                info!("Refreshed deck {} with {} words", deck.id, deck.words.len());
                self.commit_deck(deck);
                Ok(())
            }
            Err(e) => {
                error!("Failed to refresh deck {deck_id}: {e}");
                self.commit(|state| state.loading = false);
                Err(e)
            }
        }
    }

    /// Bumped on every committed change
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}
