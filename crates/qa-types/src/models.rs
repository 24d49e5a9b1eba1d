use serde::{Deserialize, Serialize};

/// A forum member. `id` is `None` until the row has been inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub fname: String,
    pub lname: String,
}

impl User {
    pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
        Self {
            id: None,
            fname: fname.into(),
            lname: lname.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    pub author_id: i64,
}

impl Question {
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            author_id,
        }
    }
}

/// A reply to a question. Replies without a parent are top-level;
/// the rest hang off another reply on the same thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: Option<i64>,
    pub body: String,
    pub question_id: i64,
    pub parent_reply_id: Option<i64>,
    pub author_id: i64,
}

impl Reply {
    pub fn new(
        body: impl Into<String>,
        question_id: i64,
        parent_reply_id: Option<i64>,
        author_id: i64,
    ) -> Self {
        Self {
            id: None,
            body: body.into(),
            question_id,
            parent_reply_id,
            author_id,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_reply_id.is_none()
    }
}

/// Links a follower to a question. The same pair may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFollow {
    pub id: Option<i64>,
    pub question_id: i64,
    pub follower_id: i64,
}

impl QuestionFollow {
    pub fn new(question_id: i64, follower_id: i64) -> Self {
        Self {
            id: None,
            question_id,
            follower_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_entities_have_no_id() {
        assert_eq!(User::new("Ada", "Lovelace").id, None);
        assert_eq!(Question::new("Q1", "B1", 1).id, None);
        assert_eq!(Reply::new("R1", 1, None, 1).id, None);
        assert_eq!(QuestionFollow::new(1, 1).id, None);
    }

    #[test]
    fn reply_without_parent_is_top_level() {
        assert!(Reply::new("first", 1, None, 1).is_top_level());
        assert!(!Reply::new("nested", 1, Some(3), 1).is_top_level());
    }

    #[test]
    fn unsaved_user_serializes_null_id() {
        let json = serde_json::to_value(User::new("Ada", "Lovelace")).unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["fname"], "Ada");
    }

    #[test]
    fn reply_deserializes_from_record() {
        let reply: Reply = serde_json::from_str(
            r#"{"id":4,"body":"hi","question_id":2,"parent_reply_id":null,"author_id":7}"#,
        )
        .unwrap();
        assert_eq!(reply.id, Some(4));
        assert_eq!(reply.parent_reply_id, None);
        assert_eq!(reply.author_id, 7);
    }
}
