// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.

pub mod solicitations;
pub mod user_tables;

pub use solicitations::{get_solicitation, list_solicitations};
pub use user_tables::list_user_tables;
