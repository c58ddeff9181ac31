use serde::Deserialize;
use validator::Validate;

/// JSON body for POST /generate/summary/youtube.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct YoutubeLinkRequest {
    #[validate(length(min = 1, message = "link must not be empty"))]
    pub link: String,
}

/// Query parameters for the GET variant of the youtube summary endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct YoutubeLinkQuery {
    #[validate(length(min = 1, message = "youtube_link must not be empty"))]
    pub youtube_link: String,
}

/// JSON body for POST /generate/quiz/.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizTextRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Query parameters for the GET variant of the quiz endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizTextQuery {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}
