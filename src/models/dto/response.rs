use serde::Serialize;

use crate::models::domain::QuizQuestion;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quiz: Vec<QuizQuestion>,
}
