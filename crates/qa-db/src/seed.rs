use qa_types::{Question, QuestionFollow, Reply, User};
use tracing::info;

use crate::Database;
use crate::error::Result;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub questions: usize,
    pub replies: usize,
    pub follows: usize,
}

/// Populates a small demo forum: three users, two questions, a threaded
/// discussion and a few follows. Rows are appended; callers decide whether
/// the store is empty enough to seed.
pub fn seed_demo(db: &Database) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    let mut users = [
        User::new("Ada", "Lovelace"),
        User::new("Charles", "Babbage"),
        User::new("Grace", "Hopper"),
    ];
    for user in &mut users {
        db.create_user(user)?;
        summary.users += 1;
    }
    let [ada, charles, grace] = users.map(|u| u.id.unwrap_or_default());

    let mut engine = Question::new(
        "How does the Analytical Engine branch?",
        "Can a card sequence repeat itself based on a result?",
        ada,
    );
    let mut compiler = Question::new(
        "Why write a compiler?",
        "Is it worth translating English-like code into machine code?",
        grace,
    );
    for question in [&mut engine, &mut compiler] {
        db.create_question(question)?;
        summary.questions += 1;
    }
    let engine_id = engine.id.unwrap_or_default();
    let compiler_id = compiler.id.unwrap_or_default();

    // Each engine reply answers the one before it.
    let mut parent = None;
    for (body, author) in [
        ("The mill can back the cards up.", charles),
        ("So loops come for free?", grace),
        ("Cycles of operations, yes.", ada),
    ] {
        let mut reply = Reply::new(body, engine_id, parent, author);
        db.create_reply(&mut reply)?;
        parent = reply.id;
        summary.replies += 1;
    }
    let mut other = Reply::new("Fewer mistakes than hand coding.", compiler_id, None, ada);
    db.create_reply(&mut other)?;
    summary.replies += 1;

    for (question_id, follower_id) in [
        (engine_id, charles),
        (engine_id, grace),
        (compiler_id, ada),
        (compiler_id, charles),
    ] {
        db.create_question_follow(&mut QuestionFollow::new(question_id, follower_id))?;
        summary.follows += 1;
    }

    info!(?summary, "Demo forum seeded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_a_connected_forum() {
        let db = Database::open_in_memory().unwrap();
        let summary = seed_demo(&db).unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                users: 3,
                questions: 2,
                replies: 4,
                follows: 4,
            }
        );
        assert_eq!(db.all_users().unwrap().len(), 3);

        let answer = db.find_reply_by_id(3).unwrap().unwrap();
        let follow_up = db.parent_reply(&answer).unwrap().unwrap();
        let top = db.parent_reply(&follow_up).unwrap().unwrap();
        assert!(top.is_top_level());
        assert_eq!(top.body, "The mill can back the cards up.");

        let engine_followers = db.followers_for_question_id(1).unwrap();
        let mut names: Vec<_> = engine_followers.iter().map(|u| u.fname.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Charles", "Grace"]);
    }
}
