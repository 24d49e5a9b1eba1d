use qa_types::{Question, QuestionFollow, User};
use tracing::debug;

use crate::Database;
use crate::error::{Result, require_id, require_unsaved};
use crate::rows::{follow_from_row, query_first, query_list, question_from_row, user_from_row};

const ENTITY: &str = "question follow";

impl Database {
    pub fn all_question_follows(&self) -> Result<Vec<QuestionFollow>> {
        self.with_conn(|conn| {
            query_list(conn, "SELECT * FROM question_follows", [], follow_from_row)
        })
    }

    pub fn find_question_follow_by_id(&self, id: i64) -> Result<Option<QuestionFollow>> {
        self.with_conn(|conn| {
            query_first(
                conn,
                "SELECT * FROM question_follows WHERE id = ?1",
                [id],
                follow_from_row,
            )
        })
    }

    /// Records a follow. Following the same question again adds another row.
    pub fn create_question_follow(&self, follow: &mut QuestionFollow) -> Result<()> {
        require_unsaved(follow.id, ENTITY)?;
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO question_follows (question_id, follower_id) VALUES (?1, ?2)",
                (follow.question_id, follow.follower_id),
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(
            id,
            question_id = follow.question_id,
            follower_id = follow.follower_id,
            "question followed"
        );
        follow.id = Some(id);
        Ok(())
    }

    pub fn update_question_follow(&self, follow: &QuestionFollow) -> Result<()> {
        let id = require_id(follow.id, ENTITY)?;
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE question_follows SET question_id = ?1, follower_id = ?2 WHERE id = ?3",
                (follow.question_id, follow.follower_id, id),
            )?)
        })?;
        debug!(id, changed, "question follow updated");
        Ok(())
    }

    /// Users following the question, repeated once per follow row.
    pub fn followers_for_question_id(&self, question_id: i64) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT users.*
                 FROM users
                 JOIN question_follows ON users.id = question_follows.follower_id
                 WHERE question_follows.question_id = ?1",
                [question_id],
                user_from_row,
            )
        })
    }

    pub fn followed_questions_for_follower_id(&self, follower_id: i64) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            query_list(
                conn,
                "SELECT questions.*
                 FROM questions
                 JOIN question_follows ON questions.id = question_follows.question_id
                 WHERE question_follows.follower_id = ?1",
                [follower_id],
                question_from_row,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbError;

    fn forum() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&mut User::new("Ada", "Lovelace")).unwrap();
        db.create_user(&mut User::new("Grace", "Hopper")).unwrap();
        db.create_question(&mut Question::new("Q1", "B1", 1)).unwrap();
        db.create_question(&mut Question::new("Q2", "B2", 2)).unwrap();
        db
    }

    #[test]
    fn duplicate_follows_are_kept() {
        let db = forum();
        let mut first = QuestionFollow::new(1, 1);
        let mut second = QuestionFollow::new(1, 1);
        db.create_question_follow(&mut first).unwrap();
        db.create_question_follow(&mut second).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(db.all_question_follows().unwrap().len(), 2);

        let followers = db.followers_for_question_id(1).unwrap();
        assert_eq!(followers.len(), 2);
        assert!(followers.iter().all(|u| u.fname == "Ada" && u.id == Some(1)));
    }

    #[test]
    fn followed_questions_for_follower() {
        let db = forum();
        db.create_question_follow(&mut QuestionFollow::new(2, 1)).unwrap();
        db.create_question_follow(&mut QuestionFollow::new(1, 2)).unwrap();

        let titles: Vec<_> = db
            .followed_questions_for_follower_id(1)
            .unwrap()
            .into_iter()
            .map(|q| (q.id, q.title))
            .collect();
        assert_eq!(titles, vec![(Some(2), "Q2".to_string())]);
        assert!(db.followed_questions_for_follower_id(3).unwrap().is_empty());
        assert!(db.followers_for_question_id(3).unwrap().is_empty());
    }

    #[test]
    fn update_moves_follow() {
        let db = forum();
        let mut follow = QuestionFollow::new(1, 1);
        db.create_question_follow(&mut follow).unwrap();

        follow.question_id = 2;
        db.update_question_follow(&follow).unwrap();

        assert_eq!(db.find_question_follow_by_id(1).unwrap(), Some(follow));
        assert!(db.followers_for_question_id(1).unwrap().is_empty());
        assert_eq!(db.followers_for_question_id(2).unwrap().len(), 1);
    }

    #[test]
    fn identity_checks() {
        let db = forum();
        let mut follow = QuestionFollow::new(1, 2);
        assert!(matches!(
            db.update_question_follow(&follow),
            Err(DbError::MissingIdentity { entity: "question follow" })
        ));

        db.create_question_follow(&mut follow).unwrap();
        assert!(matches!(
            db.create_question_follow(&mut follow),
            Err(DbError::DuplicateIdentity { id: 1, .. })
        ));
        assert_eq!(db.all_question_follows().unwrap().len(), 1);
    }
}
