// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::user_tables;
use crate::error::PersistenceError;

/// Replaces the set of tables associated with a user.
///
/// Duplicate codes are stored once.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The fully qualified user id
/// * `table_codes` - The new set of table codes
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn replace_user_tables(
    conn: &mut SqliteConnection,
    user_id: &str,
    table_codes: &[String],
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(user_tables::table.filter(user_tables::user_id.eq(user_id)))
            .execute(conn)?;

        let mut stored: Vec<&str> = Vec::with_capacity(table_codes.len());
        for code in table_codes {
            if stored.contains(&code.as_str()) {
                continue;
            }
            diesel::insert_into(user_tables::table)
                .values((
                    user_tables::user_id.eq(user_id),
                    user_tables::table_code.eq(code),
                ))
                .execute(conn)?;
            stored.push(code);
        }

        info!(user_id, count = stored.len(), "User tables replaced");
        Ok(())
    })
}
