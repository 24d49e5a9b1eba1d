//! Row-to-entity mapping and the two query shapes every repo uses.
//!
//! Columns are read by name, so queries must select the target table's
//! columns only (`SELECT users.* ...`); a joined table's `id` would
//! otherwise be ambiguous.

use qa_types::{Question, QuestionFollow, Reply, User};
use rusqlite::{Connection, OptionalExtension, Params, Row};

use crate::error::Result;

pub(crate) type RowMapper<T> = fn(&Row<'_>) -> rusqlite::Result<T>;

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        fname: row.get("fname")?,
        lname: row.get("lname")?,
    })
}

pub(crate) fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        author_id: row.get("author_id")?,
    })
}

pub(crate) fn reply_from_row(row: &Row<'_>) -> rusqlite::Result<Reply> {
    Ok(Reply {
        id: row.get("id")?,
        body: row.get("body")?,
        question_id: row.get("question_id")?,
        parent_reply_id: row.get("parent_reply_id")?,
        author_id: row.get("author_id")?,
    })
}

pub(crate) fn follow_from_row(row: &Row<'_>) -> rusqlite::Result<QuestionFollow> {
    Ok(QuestionFollow {
        id: row.get("id")?,
        question_id: row.get("question_id")?,
        follower_id: row.get("follower_id")?,
    })
}

/// Every matching row, in the order SQLite yields them.
pub(crate) fn query_list<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: RowMapper<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// First matching row; any further rows are ignored.
pub(crate) fn query_first<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: RowMapper<T>,
) -> Result<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    Ok(stmt.query_row(params, map).optional()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_columns_by_name_regardless_of_order() {
        let conn = Connection::open_in_memory().unwrap();
        let user = query_first(
            &conn,
            "SELECT 'Lovelace' AS lname, 5 AS id, 'Ada' AS fname",
            [],
            user_from_row,
        )
        .unwrap()
        .unwrap();
        assert_eq!(user.id, Some(5));
        assert_eq!(user.fname, "Ada");
        assert_eq!(user.lname, "Lovelace");
    }

    #[test]
    fn null_parent_maps_to_none() {
        let conn = Connection::open_in_memory().unwrap();
        let reply = query_first(
            &conn,
            "SELECT 1 AS id, 'b' AS body, 2 AS question_id, NULL AS parent_reply_id, 3 AS author_id",
            [],
            reply_from_row,
        )
        .unwrap()
        .unwrap();
        assert_eq!(reply.parent_reply_id, None);
        assert_eq!(reply.question_id, 2);
    }

    #[test]
    fn query_first_on_no_rows_is_none() {
        let conn = Connection::open_in_memory().unwrap();
        let follow = query_first(
            &conn,
            "SELECT 1 AS id, 1 AS question_id, 1 AS follower_id WHERE 0",
            [],
            follow_from_row,
        )
        .unwrap();
        assert_eq!(follow, None);
    }

    #[test]
    fn query_list_on_no_rows_is_empty() {
        let conn = Connection::open_in_memory().unwrap();
        let questions = query_list(
            &conn,
            "SELECT 1 AS id, 't' AS title, 'b' AS body, 1 AS author_id WHERE 0",
            [],
            question_from_row,
        )
        .unwrap();
        assert!(questions.is_empty());
    }
}
