// SPDX-License-Identifier: GPL-3.0

use std::{fs, path::Path, sync::Arc};

use futures::stream::TryStreamExt;
use log::info;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Pool, Row, Sqlite, SqlitePool};

use crate::core::errors::PersistenceError;
use crate::core::models::Deck;

/// Init the application database at `db_path`, creating it and running migrations
pub async fn init_database(db_path: &Path) -> Result<Arc<Pool<Sqlite>>, PersistenceError> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations run successfully on {}", db_path.display());

    Ok(Arc::new(pool))
}

/// Key-value storage of whole [`Deck`] records, keyed by deck id
#[allow(async_fn_in_trait)]
pub trait DeckRepository {
    async fn get(&self, deck_id: &str) -> Result<Option<Deck>, PersistenceError>;

    async fn get_all(&self) -> Result<Vec<Deck>, PersistenceError>;

    /// Insert or overwrite the whole record
    async fn put(&self, deck: &Deck) -> Result<(), PersistenceError>;

    async fn delete(&self, deck_id: &str) -> Result<(), PersistenceError>;

    async fn clear(&self) -> Result<(), PersistenceError>;
}

/// [`DeckRepository`] storing each deck as a ron document in sqlite
#[derive(Debug, Clone)]
pub struct SqliteDeckRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteDeckRepository {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }
}

impl DeckRepository for SqliteDeckRepository {
    async fn get(&self, deck_id: &str) -> Result<Option<Deck>, PersistenceError> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM decks WHERE id = ?")
                .bind(deck_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        match document {
            Some(document) => Ok(Some(Deck::from_ron(&document)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Deck>, PersistenceError> {
        let mut rows = sqlx::query("SELECT document FROM decks ORDER BY created_at ASC, id ASC")
            .fetch(self.pool.as_ref());

        let mut result = Vec::<Deck>::new();

        while let Some(row) = rows.try_next().await? {
            let document: String = row.try_get("document")?;
            result.push(Deck::from_ron(&document)?);
        }

        Ok(result)
    }

    async fn put(&self, deck: &Deck) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO decks (id, name, document, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                document = excluded.document,
                updated_at = excluded.updated_at",
        )
        .bind(&deck.id)
        .bind(&deck.name)
        .bind(deck.to_ron()?)
        .bind(deck.created_at)
        .bind(deck.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, deck_id: &str) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM decks WHERE id = ?")
            .bind(deck_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM decks")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
