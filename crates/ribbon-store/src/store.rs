use std::path::Path;

use rusqlite::{Connection, params};
use uuid::Uuid;

use ribbon_core::{Entry, PersistError, Persistence};

use crate::error::{Result, StoreError};
use crate::schema;

/// SQLite-backed entry storage. Saves are complete snapshots of the sorted
/// collection, written in one transaction; loads return entries in their
/// persisted order.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Replace the persisted set with `entries`, preserving their order
    /// through the `seq` column.
    pub fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("DELETE FROM entries;")?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (id, url, date, note, seq) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (seq, entry) in entries.iter().enumerate() {
                stmt.execute(params![
                    entry.id.to_string(),
                    entry.url,
                    entry.date,
                    entry.note,
                    seq as i64,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!("persisted {} entries", entries.len());
        Ok(())
    }

    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, date, note FROM entries ORDER BY seq")?;

        let rows: Vec<(String, String, String, String)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(id_str, url, date, note)| {
                Ok(Entry {
                    id: parse_uuid(&id_str)?,
                    url,
                    date,
                    note,
                })
            })
            .collect()
    }

    pub fn entry_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Database size in bytes (page_count * page_size).
    pub fn db_size(&self) -> Result<u64> {
        let pages: i64 = self
            .conn
            .query_row("PRAGMA page_count", [], |row| row.get(0))?;
        let page_size: i64 = self
            .conn
            .query_row("PRAGMA page_size", [], |row| row.get(0))?;
        Ok((pages * page_size) as u64)
    }
}

/// Bridge to the engine's persistence contract. `load` reports absent (not
/// empty) for a store that holds nothing, and a full database surfaces as
/// `StorageFull` so the engine keeps its in-memory state.
impl Persistence for Store {
    fn load(&self) -> std::result::Result<Option<Vec<Entry>>, PersistError> {
        let entries = self.load_entries().map_err(to_persist_error)?;
        Ok(if entries.is_empty() { None } else { Some(entries) })
    }

    fn save(&self, entries: &[Entry]) -> std::result::Result<(), PersistError> {
        self.save_entries(entries).map_err(to_persist_error)
    }
}

fn to_persist_error(e: StoreError) -> PersistError {
    if e.is_full() {
        tracing::warn!("database is full; entries kept in memory only");
        PersistError::StorageFull
    } else {
        PersistError::Backend(e.to_string())
    }
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| StoreError::InvalidData(format!("invalid UUID '{s}': {e}")))
}
