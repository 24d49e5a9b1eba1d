use qa_types::{Question, Reply, User};
use tracing::debug;

use crate::Database;
use crate::error::{Result, require_id, require_unsaved};
use crate::rows::{query_first, query_list, question_from_row, reply_from_row, user_from_row};

const ENTITY: &str = "user";

impl Database {
    pub fn all_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| query_list(conn, "SELECT * FROM users", [], user_from_row))
    }

    pub fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| {
            query_first(conn, "SELECT * FROM users WHERE id = ?1", [id], user_from_row)
        })
    }

    pub fn find_users_by_name(&self, fname: &str, lname: &str) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT * FROM users WHERE fname = ?1 AND lname = ?2",
                (fname, lname),
                user_from_row,
            )
        })
    }

    /// Inserts the user and stores the new row id on it.
    pub fn create_user(&self, user: &mut User) -> Result<()> {
        require_unsaved(user.id, ENTITY)?;
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (fname, lname) VALUES (?1, ?2)",
                (&user.fname, &user.lname),
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(id, "user created");
        user.id = Some(id);
        Ok(())
    }

    pub fn update_user(&self, user: &User) -> Result<()> {
        let id = require_id(user.id, ENTITY)?;
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE users SET fname = ?1, lname = ?2 WHERE id = ?3",
                (&user.fname, &user.lname, id),
            )?)
        })?;
        debug!(id, changed, "user updated");
        Ok(())
    }

    pub fn authored_questions(&self, user: &User) -> Result<Vec<Question>> {
        let id = require_id(user.id, ENTITY)?;
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT questions.*
                 FROM questions
                 JOIN users ON questions.author_id = users.id
                 WHERE users.id = ?1",
                [id],
                question_from_row,
            )
        })
    }

    pub fn authored_replies(&self, user: &User) -> Result<Vec<Reply>> {
        let id = require_id(user.id, ENTITY)?;
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT replies.*
                 FROM replies
                 JOIN users ON replies.author_id = users.id
                 WHERE users.id = ?1",
                [id],
                reply_from_row,
            )
        })
    }

    /// Questions this user follows, once per follow row.
    pub fn followed_questions(&self, user: &User) -> Result<Vec<Question>> {
        let id = require_id(user.id, ENTITY)?;
        self.followed_questions_for_follower_id(id)
    }
}
