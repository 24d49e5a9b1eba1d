use std::collections::HashSet;

use anyhow::{Context, Result};
use qa_db::Database;
use qa_types::{Question, Reply, User};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ReportFormat;

/// A question with everything reachable from it.
#[derive(Debug, Serialize)]
pub struct QuestionThread {
    pub question: Question,
    pub author: Option<User>,
    pub followers: Vec<User>,
    pub replies: Vec<ReplyNode>,
}

#[derive(Debug, Serialize)]
pub struct ReplyNode {
    pub reply: Reply,
    pub author: Option<User>,
    pub children: Vec<ReplyNode>,
}

pub fn build_thread(db: &Database, question: Question) -> Result<QuestionThread> {
    let author = db.question_author(&question)?;
    let followers = db.question_followers(&question)?;

    let mut seen = HashSet::new();
    let mut replies = Vec::new();
    for reply in db.question_replies(&question)? {
        if reply.is_top_level() {
            replies.push(build_node(db, reply, &mut seen)?);
        }
    }

    Ok(QuestionThread {
        question,
        author,
        followers,
        replies,
    })
}

fn build_node(db: &Database, reply: Reply, seen: &mut HashSet<i64>) -> Result<ReplyNode> {
    seen.extend(reply.id);
    let author = db.reply_author(&reply)?;
    let mut children = Vec::new();
    for child in db.child_replies(&reply)? {
        if let Some(id) = child.id {
            if seen.contains(&id) {
                warn!(reply_id = id, "reply visited twice; skipping");
                continue;
            }
        }
        children.push(build_node(db, child, seen)?);
    }
    Ok(ReplyNode {
        reply,
        author,
        children,
    })
}

/// Logs every question thread and a per-user activity line. Returns the
/// number of threads logged.
pub fn log_forum(db: &Database, format: ReportFormat) -> Result<usize> {
    let mut threads = 0;
    for question in db.all_questions()? {
        let thread = build_thread(db, question)?;
        match format {
            ReportFormat::Text => log_thread(&thread),
            ReportFormat::Json => {
                let json = serde_json::to_string_pretty(&thread)
                    .context("serializing question thread")?;
                info!("{}", json);
            }
        }
        threads += 1;
    }

    for user in db.all_users()? {
        info!(
            user = %full_name(&user),
            questions = db.authored_questions(&user)?.len(),
            replies = db.authored_replies(&user)?.len(),
            following = db.followed_questions(&user)?.len(),
            "activity"
        );
    }
    Ok(threads)
}

fn log_thread(thread: &QuestionThread) {
    let author = thread
        .author
        .as_ref()
        .map(full_name)
        .unwrap_or_else(|| "unknown".into());
    info!(
        followers = thread.followers.len(),
        "Q{} \"{}\" asked by {}",
        thread.question.id.unwrap_or_default(),
        thread.question.title,
        author
    );
    for node in &thread.replies {
        log_node(node, 1);
    }
}

fn log_node(node: &ReplyNode, depth: usize) {
    let author = node
        .author
        .as_ref()
        .map(full_name)
        .unwrap_or_else(|| "unknown".into());
    info!("{}{}: {}", "  ".repeat(depth), author, node.reply.body);
    for child in &node.children {
        log_node(child, depth + 1);
    }
}

fn full_name(user: &User) -> String {
    format!("{} {}", user.fname, user.lname)
}
