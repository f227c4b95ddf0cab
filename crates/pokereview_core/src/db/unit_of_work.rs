//! Explicit unit of work over a SQLite transaction.
//!
//! # Responsibility
//! - Collect the pending inserts/updates/deletes of one logical save.
//! - Flush them with an explicit `commit()` that reports rows affected.
//!
//! # Invariants
//! - Statements run inside the transaction as they are queued, so later
//!   statements can use ids generated by earlier ones; nothing is visible to
//!   other connections before `commit()`.
//! - Dropping a unit of work without committing rolls every statement back.

use super::DbResult;
use log::debug;
use rusqlite::{Connection, Params, Transaction, TransactionBehavior};

/// Transaction handle that tracks how many rows its statements touched.
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
    statements: usize,
    rows_affected: usize,
}

impl<'conn> UnitOfWork<'conn> {
    /// Starts an immediate transaction on `conn`.
    ///
    /// The write lock is taken up front so existence checks and the writes
    /// that follow them wait on `busy_timeout` instead of failing on lock
    /// upgrade. Repositories share `&Connection`, so the transaction is
    /// unchecked; units of work must not be nested on one connection.
    pub fn begin(conn: &'conn Connection) -> DbResult<Self> {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        Ok(Self {
            tx,
            statements: 0,
            rows_affected: 0,
        })
    }

    /// Queues one write statement and returns the rows it changed.
    pub fn execute<P: Params>(&mut self, sql: &str, params: P) -> DbResult<usize> {
        let changed = self.tx.execute(sql, params)?;
        self.statements += 1;
        self.rows_affected += changed;
        Ok(changed)
    }

    /// Queues one insert and returns the generated row id.
    pub fn insert<P: Params>(&mut self, sql: &str, params: P) -> DbResult<i64> {
        self.execute(sql, params)?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Read access inside the transaction (sees this unit's pending writes).
    pub fn connection(&self) -> &Connection {
        &self.tx
    }

    /// Rows touched so far by queued statements.
    pub fn rows_affected(&self) -> usize {
        self.rows_affected
    }

    /// Flushes all pending writes and returns the total rows affected.
    pub fn commit(self) -> DbResult<usize> {
        let Self {
            tx,
            statements,
            rows_affected,
        } = self;
        tx.commit()?;
        debug!(
            "event=uow_commit module=db status=ok statements={} rows_affected={}",
            statements, rows_affected
        );
        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::UnitOfWork;
    use crate::db::open_db_in_memory;

    fn category_count(conn: &rusqlite::Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn commit_reports_rows_affected_across_statements() {
        let conn = open_db_in_memory().unwrap();
        let mut uow = UnitOfWork::begin(&conn).unwrap();
        let first = uow
            .insert("INSERT INTO categories (name) VALUES (?1);", ["Fire"])
            .unwrap();
        let second = uow
            .insert("INSERT INTO categories (name) VALUES (?1);", ["Water"])
            .unwrap();
        assert!(second > first);
        assert_eq!(uow.rows_affected(), 2);

        assert_eq!(uow.commit().unwrap(), 2);
        assert_eq!(category_count(&conn), 2);
    }

    #[test]
    fn dropping_without_commit_rolls_back() {
        let conn = open_db_in_memory().unwrap();
        {
            let mut uow = UnitOfWork::begin(&conn).unwrap();
            uow.execute("INSERT INTO categories (name) VALUES (?1);", ["Grass"])
                .unwrap();
            assert_eq!(
                uow.connection()
                    .query_row("SELECT COUNT(*) FROM categories;", [], |row| row
                        .get::<_, i64>(0))
                    .unwrap(),
                1
            );
        }
        assert_eq!(category_count(&conn), 0);
    }

    #[test]
    fn commit_with_no_statements_reports_zero() {
        let conn = open_db_in_memory().unwrap();
        let uow = UnitOfWork::begin(&conn).unwrap();
        assert_eq!(uow.commit().unwrap(), 0);
    }
}
