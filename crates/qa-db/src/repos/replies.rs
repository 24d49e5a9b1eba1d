use std::collections::HashSet;

use qa_types::{Question, Reply, User};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::Database;
use crate::error::{DbError, Result, require_id, require_unsaved};
use crate::rows::{query_first, query_list, question_from_row, reply_from_row, user_from_row};

const ENTITY: &str = "reply";

impl Database {
    pub fn all_replies(&self) -> Result<Vec<Reply>> {
        self.with_conn(|conn| query_list(conn, "SELECT * FROM replies", [], reply_from_row))
    }

    pub fn find_reply_by_id(&self, id: i64) -> Result<Option<Reply>> {
        self.with_conn(|conn| {
            query_first(conn, "SELECT * FROM replies WHERE id = ?1", [id], reply_from_row)
        })
    }

    pub fn find_replies_by_author_id(&self, author_id: i64) -> Result<Vec<Reply>> {
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT * FROM replies WHERE author_id = ?1",
                [author_id],
                reply_from_row,
            )
        })
    }

    pub fn find_replies_by_question_id(&self, question_id: i64) -> Result<Vec<Reply>> {
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT * FROM replies WHERE question_id = ?1",
                [question_id],
                reply_from_row,
            )
        })
    }

    /// Inserts the reply and stores the new row id on it. The row id is only
    /// known after the insert, so the parent chain is checked then and the
    /// insert rolled back if it would loop back to the new reply.
    pub fn create_reply(&self, reply: &mut Reply) -> Result<()> {
        require_unsaved(reply.id, ENTITY)?;
        let id = self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO replies (body, question_id, parent_reply_id, author_id)
                 VALUES (?1, ?2, ?3, ?4)",
                (
                    &reply.body,
                    reply.question_id,
                    reply.parent_reply_id,
                    reply.author_id,
                ),
            )?;
            let id = tx.last_insert_rowid();
            if let Some(parent_id) = reply.parent_reply_id {
                check_no_cycle(&tx, id, parent_id)?;
            }
            tx.commit()?;
            Ok(id)
        })?;
        debug!(id, question_id = reply.question_id, "reply created");
        reply.id = Some(id);
        Ok(())
    }

    /// Overwrites the stored reply. A new parent that is the reply itself or
    /// one of its descendants is rejected with `ReplyCycle`.
    pub fn update_reply(&self, reply: &Reply) -> Result<()> {
        let id = require_id(reply.id, ENTITY)?;
        let changed = self.with_conn(|conn| {
            if let Some(parent_id) = reply.parent_reply_id {
                check_no_cycle(conn, id, parent_id)?;
            }
            Ok(conn.execute(
                "UPDATE replies
                 SET body = ?1, question_id = ?2, parent_reply_id = ?3, author_id = ?4
                 WHERE id = ?5",
                (
                    &reply.body,
                    reply.question_id,
                    reply.parent_reply_id,
                    reply.author_id,
                    id,
                ),
            )?)
        })?;
        debug!(id, changed, "reply updated");
        Ok(())
    }

    pub fn reply_author(&self, reply: &Reply) -> Result<Option<User>> {
        let id = require_id(reply.id, ENTITY)?;
        self.with_conn(|conn| {
            query_first(
                conn,
                "SELECT users.*
                 FROM users
                 JOIN replies ON replies.author_id = users.id
                 WHERE replies.id = ?1",
                [id],
                user_from_row,
            )
        })
    }

    pub fn reply_question(&self, reply: &Reply) -> Result<Option<Question>> {
        let id = require_id(reply.id, ENTITY)?;
        self.with_conn(|conn| {
            query_first(
                conn,
                "SELECT questions.*
                 FROM questions
                 JOIN replies ON replies.question_id = questions.id
                 WHERE replies.id = ?1",
                [id],
                question_from_row,
            )
        })
    }

    /// The reply this one answers. Top-level replies have none and
    /// cost no query.
    pub fn parent_reply(&self, reply: &Reply) -> Result<Option<Reply>> {
        match reply.parent_reply_id {
            Some(parent_id) => self.find_reply_by_id(parent_id),
            None => Ok(None),
        }
    }

    pub fn child_replies(&self, reply: &Reply) -> Result<Vec<Reply>> {
        let id = require_id(reply.id, ENTITY)?;
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT * FROM replies WHERE parent_reply_id = ?1",
                [id],
                reply_from_row,
            )
        })
    }
}

/// Walks up from `parent_id` and fails if `reply_id` is among its ancestors.
fn check_no_cycle(conn: &Connection, reply_id: i64, parent_id: i64) -> Result<()> {
    let mut seen = HashSet::new();
    let mut current = Some(parent_id);

    while let Some(ancestor) = current {
        if ancestor == reply_id {
            return Err(DbError::ReplyCycle {
                reply_id,
                parent_reply_id: parent_id,
            });
        }
        if !seen.insert(ancestor) {
            // Existing rows already loop without passing through this reply.
            warn!(ancestor, "reply chain already contains a cycle");
            break;
        }
        current = conn
            .query_row(
                "SELECT parent_reply_id FROM replies WHERE id = ?1",
                [ancestor],
                |row| row.get::<_, Option<i64>>(0),
            )
            .optional()?
            .flatten();
    }

    Ok(())
}
