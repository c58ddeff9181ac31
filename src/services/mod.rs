pub mod model_service;
pub mod quiz_generation_service;
pub mod summary_service;

pub use model_service::{CompletionClient, OpenAiCompletionClient};
pub use quiz_generation_service::QuizGenerationService;
pub use summary_service::SummaryService;
