use std::sync::Arc;

use crate::{constants::prompts::summary_prompt, errors::AppResult, services::CompletionClient};

pub struct SummaryService {
    completion_client: Arc<dyn CompletionClient>,
}

impl SummaryService {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self { completion_client }
    }

    /// One completion call; the model's markdown reply is returned
    /// unmodified.
    pub async fn create_summary(&self, text: &str) -> AppResult<String> {
        self.completion_client
            .get_ai_response(&summary_prompt(text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::prompts::SUMMARY_INSTRUCTION;
    use crate::errors::AppError;
    use crate::services::model_service::MockCompletionClient;

    #[actix_web::test]
    async fn returns_the_completion_unmodified() {
        let mut mock = MockCompletionClient::new();
        mock.expect_get_ai_response()
            .returning(|_| Ok("# Notes\n\n- point ✅".to_string()));
        let service = SummaryService::new(Arc::new(mock));

        let summary = service
            .create_summary("lecture text")
            .await
            .expect("summary should be created");

        assert_eq!(summary, "# Notes\n\n- point ✅");
    }

    #[actix_web::test]
    async fn sends_the_summary_prompt_with_source_text() {
        let mut mock = MockCompletionClient::new();
        mock.expect_get_ai_response()
            .withf(|prompt| {
                prompt.starts_with(SUMMARY_INSTRUCTION) && prompt.ends_with("lecture text")
            })
            .times(1)
            .returning(|_| Ok("summary".to_string()));
        let service = SummaryService::new(Arc::new(mock));

        service
            .create_summary("lecture text")
            .await
            .expect("summary should be created");
    }

    #[actix_web::test]
    async fn provider_failure_propagates() {
        let mut mock = MockCompletionClient::new();
        mock.expect_get_ai_response()
            .returning(|_| Err(AppError::CompletionFailed("provider down".to_string())));
        let service = SummaryService::new(Arc::new(mock));

        let result = service.create_summary("lecture text").await;

        assert!(matches!(result, Err(AppError::CompletionFailed(_))));
    }
}
