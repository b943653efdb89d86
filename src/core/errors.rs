// SPDX-License-Identifier: GPL-3.0

use thiserror::Error;

/// Failures of the remote vocabulary source
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed vocab payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("The vocab catalog is empty")]
    Empty,
}

impl CatalogError {
    pub(crate) fn request(url: &str, source: reqwest::Error) -> Self {
        CatalogError::Request {
            url: url.to_string(),
            source,
        }
    }
}

/// Failures of the deck database
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Could not encode deck: {0}")]
    Encode(#[from] ron::Error),

    #[error("Could not decode deck: {0}")]
    Decode(#[from] ron::error::SpannedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the deck store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Network(#[from] CatalogError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Deck not found: {0}")]
    UnknownDeck(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
