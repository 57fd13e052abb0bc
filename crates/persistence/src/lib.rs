// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for voltage control solicitations.
//!
//! Built on Diesel with a `SQLite` backend. Stores solicitations, their
//! status history, and user to table associations.
//!
//! ## Consistency
//!
//! - A solicitation batch is inserted in one transaction together with the
//!   creation events.
//! - Status updates are compare-and-set on the current status, so two
//!   concurrent writers cannot both move the same solicitation.
//! - List queries read from one transaction.
//!
//! ## Testing
//!
//! Tests run against shared in-memory databases, one per `Persistence`
//! instance.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use zapcot::StatusChange;
use zapcot_domain::{NewSolicitation, Solicitation};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for solicitations and user tables.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Stores a batch of validated solicitations atomically.
    ///
    /// # Returns
    ///
    /// The assigned ids in batch order.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be stored; nothing is stored then.
    pub fn insert_solicitations(
        &mut self,
        batch: &[NewSolicitation],
    ) -> Result<Vec<i64>, PersistenceError> {
        mutations::insert_solicitations(&mut self.conn, batch)
    }

    /// Retrieves a solicitation with its status history.
    ///
    /// # Errors
    ///
    /// Returns `SolicitationNotFound` if it does not exist.
    pub fn get_solicitation(&mut self, solicitation_id: i64) -> Result<Solicitation, PersistenceError> {
        queries::get_solicitation(&mut self.conn, solicitation_id)
    }

    /// Applies a status change computed against `change.expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StatusConflict` if the stored status no longer matches, or
    /// `SolicitationNotFound` if the solicitation does not exist.
    pub fn apply_status_change(&mut self, change: &StatusChange) -> Result<(), PersistenceError> {
        mutations::apply_status_change(&mut self.conn, change)
    }

    /// Lists solicitations, optionally scoped to a company and a minimum id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_solicitations(
        &mut self,
        company_code: Option<&str>,
        from_id: Option<i64>,
    ) -> Result<Vec<Solicitation>, PersistenceError> {
        queries::list_solicitations(&mut self.conn, company_code, from_id)
    }

    /// Replaces the tables associated with a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn replace_user_tables(
        &mut self,
        user_id: &str,
        table_codes: &[String],
    ) -> Result<(), PersistenceError> {
        mutations::replace_user_tables(&mut self.conn, user_id, table_codes)
    }

    /// Lists the tables associated with a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_user_tables(&mut self, user_id: &str) -> Result<Vec<String>, PersistenceError> {
        queries::list_user_tables(&mut self.conn, user_id)
    }
}
