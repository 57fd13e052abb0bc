// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::user_tables;
use crate::error::PersistenceError;

/// Lists the table codes associated with a user, sorted by code.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_user_tables(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<String>, PersistenceError> {
    Ok(user_tables::table
        .filter(user_tables::user_id.eq(user_id))
        .select(user_tables::table_code)
        .order(user_tables::table_code.asc())
        .load(conn)?)
}
