//! Repository methods for the forum entities.
//!
//! Each module adds methods to `Database` via an `impl Database` block.
//! Collection lookups return an empty `Vec` when nothing matches and
//! single-row lookups return `None`.

pub mod follows;
pub mod questions;
pub mod replies;
pub mod users;
