//! LKB Storage Layer
//!
//! Implements the `DictionaryCache` trait using SQLite.
//!
//! A cache holds the entity records a feed produced together with the
//! fingerprint of the settings they were built from. When the fingerprint of
//! a freshly resolved feed still matches, the dictionary is rebuilt from the
//! cache and the (expensive) feed is never pushed.
//!
//! # Examples
//!
//! ```no_run
//! use lkb_store::SqliteDictionaryCache;
//!
//! let cache = SqliteDictionaryCache::new(":memory:").unwrap();
//! // Cache is now ready for dictionary operations
//! ```

#![warn(missing_docs)]

use lkb_domain::traits::DictionaryCache;
use lkb_domain::{EntityListener, EntityRecord, Fingerprint};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const FINGERPRINT_KEY: &str = "fingerprint";
const POPULATED_KEY: &str = "populated";

/// Errors that can occur during cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of DictionaryCache
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// cache instance.
pub struct SqliteDictionaryCache {
    conn: Connection,
}

impl SqliteDictionaryCache {
    /// Open (or create) a cache at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lkb_store::SqliteDictionaryCache;
    ///
    /// let cache = SqliteDictionaryCache::new("dictionary.cache.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), CacheError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of cached entity records
    pub fn entity_count(&self) -> Result<usize, CacheError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entities", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Cached records with the given alias, in insertion order
    pub fn lookup_alias(&self, alias: &str) -> Result<Vec<EntityRecord>, CacheError> {
        let mut stmt = self.conn.prepare(
            "SELECT instance_uri, class_uri, alias_label FROM entities
             WHERE alias_label = ?1 ORDER BY seq",
        )?;
        let records = stmt
            .query_map(params![alias], |row| {
                Ok(EntityRecord::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Drop the compiled dictionary and its fingerprint
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.conn
            .execute_batch("DELETE FROM entities; DELETE FROM cache_meta;")?;
        Ok(())
    }

    fn meta(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM cache_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl DictionaryCache for SqliteDictionaryCache {
    type Error = CacheError;

    fn stored_fingerprint(&self) -> Result<Option<Fingerprint>, Self::Error> {
        match self.meta(FINGERPRINT_KEY)? {
            Some(raw) => raw
                .parse::<i32>()
                .map(|v| Some(Fingerprint::from_value(v)))
                .map_err(|e| CacheError::InvalidData(format!("Bad fingerprint '{}': {}", raw, e))),
            None => Ok(None),
        }
    }

    fn is_populated(&self) -> Result<bool, Self::Error> {
        Ok(self.meta(POPULATED_KEY)?.is_some())
    }

    fn store(
        &mut self,
        fingerprint: Option<Fingerprint>,
        records: &[EntityRecord],
    ) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;
        tx.execute_batch("DELETE FROM entities; DELETE FROM cache_meta;")?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO entities (instance_uri, class_uri, alias_label) VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                insert.execute(params![
                    &record.instance_uri,
                    &record.class_uri,
                    &record.alias_label
                ])?;
            }
        }
        if let Some(fp) = fingerprint {
            tx.execute(
                "INSERT INTO cache_meta (key, value) VALUES (?1, ?2)",
                params![FINGERPRINT_KEY, fp.value().to_string()],
            )?;
        }
        tx.execute(
            "INSERT INTO cache_meta (key, value) VALUES (?1, '1')",
            params![POPULATED_KEY],
        )?;
        tx.commit()?;

        debug!("Cached {} entities (fingerprint {:?})", records.len(), fingerprint);
        Ok(())
    }

    fn replay(&self, listener: &mut dyn EntityListener) -> Result<usize, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT instance_uri, class_uri, alias_label FROM entities ORDER BY seq")?;
        let mut rows = stmt.query([])?;

        let mut count = 0;
        while let Some(row) = rows.next()? {
            let instance: String = row.get(0)?;
            let class: String = row.get(1)?;
            let alias: String = row.get(2)?;
            listener.add_entity(&instance, &class, &alias);
            count += 1;
        }
        Ok(count)
    }
}
