use std::sync::Arc;

use crate::{
    constants::prompts::quiz_prompt,
    errors::{AppError, AppResult},
    models::domain::QuizQuestion,
    parsers::{parse_quiz_reply, QuizReplyError},
    services::CompletionClient,
};

pub struct QuizGenerationService {
    completion_client: Arc<dyn CompletionClient>,
    max_parse_attempts: u32,
}

impl QuizGenerationService {
    pub fn new(completion_client: Arc<dyn CompletionClient>, max_parse_attempts: u32) -> Self {
        Self {
            completion_client,
            max_parse_attempts: max_parse_attempts.max(1),
        }
    }

    /// Build the quiz prompt, call the model, and parse the reply. A reply
    /// that fails to parse at the syntax level (truncated or garbled
    /// literal) restarts the round-trip from prompt construction, up to
    /// the configured attempt budget. A reply that parses but has the
    /// wrong shape aborts immediately, as do provider failures.
    pub async fn generate_quiz(&self, text: &str) -> AppResult<Vec<QuizQuestion>> {
        let mut last_error = None;

        for attempt in 1..=self.max_parse_attempts {
            let prompt = quiz_prompt(text);
            let reply = self.completion_client.get_ai_response(&prompt).await?;

            match parse_quiz_reply(&reply) {
                Ok(questions) => return Ok(questions),
                Err(err @ QuizReplyError::Syntax { .. }) => {
                    log::warn!(
                        "quiz reply attempt {attempt}/{} did not parse: {err}",
                        self.max_parse_attempts
                    );
                    last_error = Some(err);
                }
                Err(QuizReplyError::Structure(message)) => {
                    return Err(AppError::QuizMalformed(message));
                }
            }
        }

        let detail = last_error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "no reply parsed".to_string());
        Err(AppError::QuizParse(format!(
            "gave up after {} attempts: {detail}",
            self.max_parse_attempts
        )))
    }
}
