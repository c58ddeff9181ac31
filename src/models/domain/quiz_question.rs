use serde::{Deserialize, Serialize};

/// One multiple-choice question as parsed from the model's reply. The
/// prompt asks for 4 options and an answer matching one of them; neither
/// is enforced here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}
