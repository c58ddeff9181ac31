use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub openai_api_base: Option<String>,
    pub transcript_language: String,
    pub quiz_parse_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "dev_key_unset".to_string()),
            ),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            transcript_language: env::var("TRANSCRIPT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
            quiz_parse_max_attempts: env::var("QUIZ_PARSE_MAX_ATTEMPTS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret() == "dev_key_unset" {
            panic!(
                "FATAL: OPENAI_API_KEY is not set! Set OPENAI_API_KEY environment variable to a valid provider key."
            );
        }

        if self.quiz_parse_max_attempts == 0 {
            panic!("FATAL: QUIZ_PARSE_MAX_ATTEMPTS must be at least 1.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            openai_api_key: SecretString::from("test_api_key".to_string()),
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_base: None,
            transcript_language: "en".to_string(),
            quiz_parse_max_attempts: 3,
        }
    }
}
