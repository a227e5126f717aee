//! Write transactions for SqliteStore.

use super::SqliteStore;
use crate::storage::StorageResult;
use rusqlite::{Connection, Params};

/// An open write transaction. Dropping it without [`Transaction::commit`]
/// rolls everything back, including on early `?` returns.
pub struct Transaction<'a> {
    conn: &'a Connection,
    committed: bool,
}

impl<'a> Transaction<'a> {
    /// Takes the write lock up front so a concurrent writer fails here
    /// rather than halfway through a save.
    pub(crate) fn begin(conn: &'a Connection) -> StorageResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self {
            conn,
            committed: false,
        })
    }

    pub fn conn(&self) -> &Connection {
        self.conn
    }

    pub fn execute(&self, sql: &str, params: impl Params) -> StorageResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    pub fn commit(mut self) -> StorageResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            tracing::warn!(error = %e, "rollback failed");
        } else {
            tracing::debug!("transaction rolled back");
        }
    }
}

impl SqliteStore {
    /// Begins a transaction that rolls back unless committed.
    pub fn transaction(&mut self) -> StorageResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }

    /// Runs `work` in a transaction and commits only if it succeeds.
    pub fn in_transaction<T>(
        &mut self,
        work: impl FnOnce(&Transaction<'_>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let tx = self.transaction()?;
        let value = work(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
