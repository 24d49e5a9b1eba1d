//! Error type for forum store operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// `create` was called on an entity that already has a row.
    #[error("{entity} already has id {id}")]
    DuplicateIdentity { entity: &'static str, id: i64 },

    /// The operation needs a persisted entity but this one has no id.
    #[error("{entity} has no id; create it first")]
    MissingIdentity { entity: &'static str },

    /// Re-parenting a reply would make it its own ancestor.
    #[error("reply {reply_id} cannot take reply {parent_reply_id} as parent: cycle")]
    ReplyCycle { reply_id: i64, parent_reply_id: i64 },

    #[error("DB lock poisoned: {0}")]
    LockPoisoned(String),

    /// Anything raised by SQLite itself, passed through untouched.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Returns the id of a persisted entity, or `MissingIdentity`.
pub(crate) fn require_id(id: Option<i64>, entity: &'static str) -> Result<i64> {
    id.ok_or(DbError::MissingIdentity { entity })
}

/// Fails with `DuplicateIdentity` when the entity was already inserted.
pub(crate) fn require_unsaved(id: Option<i64>, entity: &'static str) -> Result<()> {
    match id {
        Some(id) => Err(DbError::DuplicateIdentity { entity, id }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_id_passes_through_persisted_ids() {
        assert_eq!(require_id(Some(9), "user").unwrap(), 9);
    }

    #[test]
    fn require_id_rejects_unsaved() {
        let err = require_id(None, "question").unwrap_err();
        assert!(matches!(err, DbError::MissingIdentity { entity: "question" }));
        assert_eq!(err.to_string(), "question has no id; create it first");
    }

    #[test]
    fn require_unsaved_rejects_persisted() {
        assert!(require_unsaved(None, "reply").is_ok());
        let err = require_unsaved(Some(3), "reply").unwrap_err();
        assert!(matches!(err, DbError::DuplicateIdentity { entity: "reply", id: 3 }));
    }
}
