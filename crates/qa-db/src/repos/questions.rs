use qa_types::{Question, Reply, User};
use tracing::debug;

use crate::Database;
use crate::error::{Result, require_id, require_unsaved};
use crate::rows::{query_first, query_list, question_from_row, user_from_row};

const ENTITY: &str = "question";

impl Database {
    pub fn all_questions(&self) -> Result<Vec<Question>> {
        self.with_conn(|conn| query_list(conn, "SELECT * FROM questions", [], question_from_row))
    }

    pub fn find_question_by_id(&self, id: i64) -> Result<Option<Question>> {
        self.with_conn(|conn| {
            query_first(
                conn,
                "SELECT * FROM questions WHERE id = ?1",
                [id],
                question_from_row,
            )
        })
    }

    pub fn find_questions_by_author_id(&self, author_id: i64) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT * FROM questions WHERE author_id = ?1",
                [author_id],
                question_from_row,
            )
        })
    }

    /// Inserts the question and stores the new row id on it. The author id is
    /// not checked here; SQLite rejects a dangling one only when foreign keys
    /// are enforced.
    pub fn create_question(&self, question: &mut Question) -> Result<()> {
        require_unsaved(question.id, ENTITY)?;
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO questions (title, body, author_id) VALUES (?1, ?2, ?3)",
                (&question.title, &question.body, question.author_id),
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(id, author_id = question.author_id, "question created");
        question.id = Some(id);
        Ok(())
    }

    pub fn update_question(&self, question: &Question) -> Result<()> {
        let id = require_id(question.id, ENTITY)?;
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE questions SET title = ?1, body = ?2, author_id = ?3 WHERE id = ?4",
                (&question.title, &question.body, question.author_id, id),
            )?)
        })?;
        debug!(id, changed, "question updated");
        Ok(())
    }

    /// The asking user. `None` only if the author row is gone.
    pub fn question_author(&self, question: &Question) -> Result<Option<User>> {
        let id = require_id(question.id, ENTITY)?;
        self.with_conn(|conn| {
            query_first(
                conn,
                "SELECT users.*
                 FROM users
                 JOIN questions ON users.id = questions.author_id
                 WHERE questions.id = ?1",
                [id],
                user_from_row,
            )
        })
    }

    pub fn question_replies(&self, question: &Question) -> Result<Vec<Reply>> {
        let id = require_id(question.id, ENTITY)?;
        self.find_replies_by_question_id(id)
    }

    pub fn question_followers(&self, question: &Question) -> Result<Vec<User>> {
        let id = require_id(question.id, ENTITY)?;
        self.followers_for_question_id(id)
    }
}
