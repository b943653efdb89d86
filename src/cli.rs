// SPDX-License-Identifier: GPL-3.0

use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

use crate::config::WordShortsConfig;
use crate::core::catalog::{CatalogSource, HttpCatalog};
use crate::core::database::{DeckRepository, SqliteDeckRepository, init_database};
use crate::core::models::{DeckStats, Stage};
use crate::navigator::{Navigator, StagedWord, WordQuery, sorted_by_text, staged_words};
use crate::store::DeckStore;

#[derive(Parser, Debug)]
#[command(name = "word-shorts", version, about = "Memorize vocabulary in three stages")]
pub struct Cli {
    /// Override the vocab api base url
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the progress of the current deck
    Stats,
    /// List the stored decks
    Decks,
    /// List the words of the current deck
    List {
        /// Only words in this stage
        #[arg(long)]
        stage: Option<Stage>,
        /// Case-insensitive search over words and meanings
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = SortOrder::Stage)]
        sort: SortOrder,
        /// Scroll offset, in the configured row unit
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Viewport height; prints only the visible window when set
        #[arg(long)]
        height: Option<u32>,
    },
    /// Move words of the current deck to another stage
    Move {
        stage: Stage,
        #[arg(required = true)]
        word_ids: Vec<String>,
    },
    /// Fetch the catalog again. Every word goes back to unlearned.
    Refresh { deck_id: Option<String> },
    /// Look up a word and its illustrations
    Show { word: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Grouped by stage, catalog order inside a stage
    Stage,
    /// Alphabetical, like the checklist
    Text,
}

pub async fn run(cli: Cli) -> Result<(), anywho::Error> {
    let mut config = WordShortsConfig::config();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }

    let db_path = config.database_path()?;
    debug!("Using database {}", db_path.display());
    let pool = init_database(&db_path).await?;

    let catalog = HttpCatalog::new(config.api_base.clone());
    let store = DeckStore::new(
        SqliteDeckRepository::new(pool),
        catalog.clone(),
        config.default_deck.clone(),
    );

    if let Err(e) = store.bootstrap().await {
        debug!("Continuing without decks: {e}");
    }

    match cli.command.unwrap_or(Command::Stats) {
        Command::Stats => print_stats(&store),
        Command::Decks => {
            let current = store.current_deck().map(|d| d.id.clone());
            for deck in store.decks() {
                let marker = if Some(&deck.id) == current.as_ref() { "*" } else { " " };
                println!("{marker} {}  {} ({} words)", deck.id, deck.name, deck.words.len());
            }
        }
        Command::List {
            stage,
            search,
            sort,
            offset,
            height,
        } => {
            let Some(deck) = store.current_deck() else {
                println!("No deck available");
                return Ok(());
            };

            let staged = staged_words(&deck);
            let filtered = WordQuery::new(&search, stage).apply(&staged);
            let rows = match sort {
                SortOrder::Stage => filtered,
                SortOrder::Text => sorted_by_text(&filtered),
            };

            let range = match height {
                Some(height) => config.list.range(rows.len(), height, offset),
                None => 0..rows.len(),
            };
            for (index, row) in rows[range.clone()].iter().enumerate() {
                print_row(range.start + index, row);
            }
            println!("-- {} of {} words", range.len(), rows.len());
        }
        Command::Move { stage, word_ids } => {
            if store.current_deck().is_none() {
                println!("No deck available");
                return Ok(());
            }
            store.move_words(&word_ids, stage).await?;
            print_stats(&store);
        }
        Command::Refresh { deck_id } => {
            let Some(deck_id) = deck_id.or_else(|| store.current_deck().map(|d| d.id.clone()))
            else {
                println!("No deck available");
                return Ok(());
            };
            store.refresh_deck(&deck_id).await?;
            print_stats(&store);
        }
        Command::Show { word } => {
            let detail = catalog.load_word_detail(&word).await?;
            println!("{} [{}]", detail.text, detail.slug);
            if let Some(meaning) = &detail.meaning_en {
                println!("  en: {meaning}");
            }
            if let Some(meaning) = &detail.meaning_kr {
                println!("  kr: {meaning}");
            }

            let mut navigator = Navigator::new(1);
            navigator.set_media_count(0, detail.images.len());
            for (index, item) in detail.images.iter().enumerate() {
                let marker = if index == navigator.media_index() { ">" } else { " " };
                println!(
                    "{marker} {:>2}. {:<16} {}",
                    index + 1,
                    item.style_name,
                    catalog.media_url(&detail.slug, item)
                );
            }
        }
    }

    Ok(())
}

fn print_row(index: usize, row: &StagedWord<'_>) {
    println!(
        "{:>5}  {:<10} {:<20} {:<4} {}",
        index + 1,
        row.word.id,
        row.word.text,
        row.stage.label(),
        row.word.meaning().unwrap_or("-"),
    );
}

fn print_stats<R, C>(store: &DeckStore<R, C>)
where
    R: DeckRepository,
    C: CatalogSource,
{
    let (Some(deck), Some(stats)) = (store.current_deck(), store.deck_stats(None)) else {
        println!("No deck available");
        return;
    };

    println!("{} ({} words)", deck.name, stats.total);
    for stage in Stage::ALL {
        print_stage_line(&stats, stage);
    }
}

fn print_stage_line(stats: &DeckStats, stage: Stage) {
    println!(
        "  {:<10} {:<6} {:>6} {:>4}%",
        stage.to_string(),
        stage.label(),
        stats.count(stage),
        stats.percent(stage)
    );
}
