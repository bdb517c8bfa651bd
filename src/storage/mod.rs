//! Recommendation persistence
//!
//! [`RecommendationStore`] decouples the pipeline and server from the
//! storage backend: SQLite in production, an in-memory table for tests and
//! ephemeral runs. A pipeline run touches the store exactly once at the
//! end, so the store's own locking is the only discipline required.

use std::path::Path;
use std::sync::{Mutex, RwLock};

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{Category, PriceTier, Recommendation};

/// Keyed table of enriched records
pub trait RecommendationStore: Send + Sync {
    /// Persist a batch of records.
    ///
    /// With `append = false` all prior rows are deleted first. Either way a
    /// record is only inserted when no row with the same `name` exists.
    /// Returns the number of rows inserted.
    fn save(&self, items: &[Recommendation], append: bool) -> Result<usize>;

    /// All stored records, best rating first
    fn all_by_rating(&self) -> Result<Vec<Recommendation>>;
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS recommendations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    category    TEXT NOT NULL,
    image       TEXT,
    influencer  TEXT,
    quote       TEXT,
    rating      REAL,
    price_range TEXT,
    location    TEXT,
    source_url  TEXT,
    article_url TEXT,
    address     TEXT,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_recommendations_name ON recommendations(name);
";

/// SQLite-backed store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (and initialize if needed) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (tests, ephemeral CLI runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock means another thread panicked mid-statement;
        // the connection itself is still usable
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecommendationStore for SqliteStore {
    fn save(&self, items: &[Recommendation], append: bool) -> Result<usize> {
        let conn = self.lock();
        if !append {
            conn.execute("DELETE FROM recommendations", [])?;
        }

        let mut inserted = 0usize;
        for item in items {
            let exists: bool = conn
                .query_row(
                    "SELECT 1 FROM recommendations WHERE name = ?1 LIMIT 1",
                    params![item.name],
                    |_| Ok(true),
                )
                .unwrap_or(false);
            if exists {
                continue;
            }

            conn.execute(
                "INSERT INTO recommendations
                    (name, category, image, influencer, quote, rating,
                     price_range, location, source_url, article_url, address,
                     created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    item.name,
                    item.category.as_str(),
                    item.image,
                    item.influencer,
                    item.quote,
                    item.rating,
                    item.price_range.as_str(),
                    item.location,
                    item.source_url,
                    item.article_url,
                    item.address,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            inserted += 1;
        }

        tracing::info!(inserted = inserted, append = append, "recommendations saved");
        Ok(inserted)
    }

    fn all_by_rating(&self) -> Result<Vec<Recommendation>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT name, category, image, influencer, quote, rating,
                    price_range, location, source_url, article_url, address
             FROM recommendations
             ORDER BY rating DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let category: String = row.get(1)?;
            let price_range: String = row.get(6)?;
            Ok(Recommendation {
                name: row.get(0)?,
                category: category.parse::<Category>().unwrap_or(Category::Food),
                image: row.get(2)?,
                influencer: row.get(3)?,
                quote: row.get(4)?,
                rating: row.get(5)?,
                price_range: price_range
                    .parse::<PriceTier>()
                    .unwrap_or(PriceTier::Moderate),
                location: row.get(7)?,
                source_url: row.get(8)?,
                article_url: row.get(9)?,
                address: row.get(10)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }
}

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Recommendation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecommendationStore for MemoryStore {
    fn save(&self, items: &[Recommendation], append: bool) -> Result<usize> {
        let mut store = self.items.write().unwrap_or_else(|e| e.into_inner());
        if !append {
            store.clear();
        }
        let mut inserted = 0usize;
        for item in items {
            if store.iter().any(|existing| existing.name == item.name) {
                continue;
            }
            store.push(item.clone());
            inserted += 1;
        }
        Ok(inserted)
    }

    fn all_by_rating(&self) -> Result<Vec<Recommendation>> {
        let store = self.items.read().unwrap_or_else(|e| e.into_inner());
        let mut items = store.clone();
        items.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PriceTier};

    fn record(name: &str, rating: f64) -> Recommendation {
        Recommendation {
            name: name.to_string(),
            category: Category::Food,
            image: String::new(),
            influencer: "愛食記".to_string(),
            quote: "值得一訪".to_string(),
            rating,
            price_range: PriceTier::from_rating(rating),
            location: "台北".to_string(),
            source_url: String::new(),
            article_url: String::new(),
            address: "台北市".to_string(),
        }
    }

    #[test]
    fn test_sqlite_save_and_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let inserted = store
            .save(&[record("A", 4.2), record("B", 4.8), record("C", 3.9)], false)
            .unwrap();
        assert_eq!(inserted, 3);

        let all = store.all_by_rating().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "B");
        assert_eq!(all[2].name, "C");
        assert_eq!(all[0].price_range, PriceTier::Upscale);
    }

    #[test]
    fn test_sqlite_replace_clears_prior_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(&[record("old", 4.0)], false).unwrap();
        store.save(&[record("new", 4.5)], false).unwrap();

        let all = store.all_by_rating().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "new");
    }

    #[test]
    fn test_sqlite_append_skips_existing_names() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save(&[record("A", 4.0)], false).unwrap();
        let inserted = store
            .save(&[record("A", 4.9), record("B", 4.1)], true)
            .unwrap();
        assert_eq!(inserted, 1);

        let all = store.all_by_rating().unwrap();
        assert_eq!(all.len(), 2);
        // The original A row survives untouched
        let a = all.iter().find(|r| r.name == "A").unwrap();
        assert_eq!(a.rating, 4.0);
    }

    #[test]
    fn test_sqlite_duplicate_within_batch() {
        let store = SqliteStore::open_in_memory().unwrap();
        let inserted = store
            .save(&[record("A", 4.0), record("A", 4.5)], false)
            .unwrap();
        assert_eq!(inserted, 1);
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tastemap.db");

        let store = SqliteStore::open(&path).unwrap();
        store.save(&[record("A", 4.0)], false).unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        let all = reopened.all_by_rating().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "A");
    }

    #[test]
    fn test_memory_store_mirrors_contract() {
        let store = MemoryStore::new();
        store.save(&[record("A", 4.0), record("B", 4.6)], false).unwrap();
        let inserted = store.save(&[record("A", 5.0)], true).unwrap();
        assert_eq!(inserted, 0);

        let all = store.all_by_rating().unwrap();
        assert_eq!(all[0].name, "B");

        store.save(&[record("C", 3.5)], false).unwrap();
        let all = store.all_by_rating().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "C");
    }
}
