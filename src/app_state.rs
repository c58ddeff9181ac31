use std::sync::Arc;

use crate::{
    config::Config,
    extractors::{
        HttpTranscriptFetcher, PdfExtractConverter, PdfExtractor, PdfTextConverter,
        TranscriptExtractor, TranscriptFetcher,
    },
    services::{CompletionClient, OpenAiCompletionClient, QuizGenerationService, SummaryService},
};

#[derive(Clone)]
pub struct AppState {
    pub pdf_extractor: Arc<PdfExtractor>,
    pub transcript_extractor: Arc<TranscriptExtractor>,
    pub summary_service: Arc<SummaryService>,
    pub quiz_service: Arc<QuizGenerationService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completion_client: Arc<dyn CompletionClient> =
            Arc::new(OpenAiCompletionClient::new(&config));
        let pdf_converter: Arc<dyn PdfTextConverter> = Arc::new(PdfExtractConverter);
        let transcript_fetcher: Arc<dyn TranscriptFetcher> =
            Arc::new(HttpTranscriptFetcher::new(&config.transcript_language));

        Self::with_collaborators(config, completion_client, pdf_converter, transcript_fetcher)
    }

    /// Wire the state from explicit collaborators. Production goes through
    /// `new`; tests inject stubs here.
    pub fn with_collaborators(
        config: Config,
        completion_client: Arc<dyn CompletionClient>,
        pdf_converter: Arc<dyn PdfTextConverter>,
        transcript_fetcher: Arc<dyn TranscriptFetcher>,
    ) -> Self {
        let pdf_extractor = Arc::new(PdfExtractor::new(pdf_converter));
        let transcript_extractor = Arc::new(TranscriptExtractor::new(transcript_fetcher));
        let summary_service = Arc::new(SummaryService::new(completion_client.clone()));
        let quiz_service = Arc::new(QuizGenerationService::new(
            completion_client,
            config.quiz_parse_max_attempts,
        ));

        Self {
            pdf_extractor,
            transcript_extractor,
            summary_service,
            quiz_service,
            config: Arc::new(config),
        }
    }
}
