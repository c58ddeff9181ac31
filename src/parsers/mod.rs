pub mod quiz_reply;

pub use quiz_reply::{parse_quiz_reply, QuizReplyError};
