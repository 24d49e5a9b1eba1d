pub mod models;

pub use models::{Question, QuestionFollow, Reply, User};
