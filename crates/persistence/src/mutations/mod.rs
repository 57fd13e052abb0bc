// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! - `solicitations`: Batch creation and compare-and-set status updates
//! - `user_tables`: User to table associations

pub mod solicitations;
pub mod user_tables;

pub use solicitations::{apply_status_change, insert_solicitations};
pub use user_tables::replace_user_tables;
