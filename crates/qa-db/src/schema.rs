use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

/// Creates the forum tables if they are missing. Existing tables are left as is.
pub fn ensure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id      INTEGER PRIMARY KEY,
            fname   TEXT NOT NULL,
            lname   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS questions (
            id          INTEGER PRIMARY KEY,
            title       TEXT NOT NULL,
            body        TEXT NOT NULL,
            author_id   INTEGER NOT NULL REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_questions_author
            ON questions(author_id);

        CREATE TABLE IF NOT EXISTS replies (
            id                  INTEGER PRIMARY KEY,
            body                TEXT NOT NULL,
            question_id         INTEGER NOT NULL REFERENCES questions(id),
            parent_reply_id     INTEGER REFERENCES replies(id),
            author_id           INTEGER NOT NULL REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_replies_question
            ON replies(question_id);
        CREATE INDEX IF NOT EXISTS idx_replies_parent
            ON replies(parent_reply_id);

        -- Following the same question twice is allowed.
        CREATE TABLE IF NOT EXISTS question_follows (
            id          INTEGER PRIMARY KEY,
            question_id INTEGER NOT NULL REFERENCES questions(id),
            follower_id INTEGER NOT NULL REFERENCES users(id)
        );

        CREATE INDEX IF NOT EXISTS idx_question_follows_question
            ON question_follows(question_id);
        CREATE INDEX IF NOT EXISTS idx_question_follows_follower
            ON question_follows(follower_id);
        ",
    )?;

    info!("Forum schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        ensure(&conn).unwrap();
        assert_eq!(
            table_names(&conn),
            vec!["question_follows", "questions", "replies", "users"]
        );
    }

    #[test]
    fn is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure(&conn).unwrap();
        conn.execute("INSERT INTO users (fname, lname) VALUES ('Ada', 'Lovelace')", [])
            .unwrap();
        ensure(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
