//! Drives the quiz generation pipeline end to end with a scripted
//! completion collaborator: each test hands the service a sequence of
//! replies and checks which of them the retry loop consumes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use impartease_server::errors::{AppError, AppResult};
use impartease_server::services::{CompletionClient, QuizGenerationService};

const WELL_FORMED: &str = "[{'question': 'What is the capital of France?', 'options': ['Paris', 'London', 'Berlin', 'Madrid'], 'answer': 'Paris'}, {'question': 'Second?', 'options': ['a', 'b', 'c', 'd'], 'answer': 'b'}]";

const TRUNCATED: &str = "[{'question': 'What is the capital of France?', 'options': ['Par";

/// Replays a fixed sequence of replies, then repeats the last one.
struct ScriptedCompletionClient {
    replies: Mutex<Vec<AppResult<String>>>,
    calls: AtomicUsize,
}

impl ScriptedCompletionClient {
    fn new(replies: Vec<AppResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn get_ai_response(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        }
    }
}

#[actix_web::test]
async fn malformed_then_valid_reply_round_trips_again_and_succeeds() {
    let client = ScriptedCompletionClient::new(vec![
        Ok(TRUNCATED.to_string()),
        Ok(WELL_FORMED.to_string()),
    ]);
    let service = QuizGenerationService::new(client.clone(), 5);

    let quiz = service
        .generate_quiz("lecture text")
        .await
        .expect("the second reply is well-formed");

    assert_eq!(client.calls(), 2);
    assert_eq!(quiz.len(), 2);
    assert_eq!(quiz[0].question, "What is the capital of France?");
    assert_eq!(quiz[0].options, vec!["Paris", "London", "Berlin", "Madrid"]);
    assert_eq!(quiz[0].answer, "Paris");
    assert_eq!(quiz[1].answer, "b");
}

#[actix_web::test]
async fn persistently_malformed_replies_exhaust_the_budget() {
    let client = ScriptedCompletionClient::new(vec![Ok(TRUNCATED.to_string())]);
    let service = QuizGenerationService::new(client.clone(), 3);

    let result = service.generate_quiz("lecture text").await;

    assert_eq!(client.calls(), 3);
    match result {
        Err(AppError::QuizParse(detail)) => {
            assert!(detail.contains("3 attempts"), "detail: {detail}")
        }
        other => panic!("expected QuizParse, got {other:?}"),
    }
}

#[actix_web::test]
async fn wrong_shape_reply_fails_without_a_second_call() {
    let client = ScriptedCompletionClient::new(vec![
        Ok("['a', 'b', 'c']".to_string()),
        Ok(WELL_FORMED.to_string()),
    ]);
    let service = QuizGenerationService::new(client.clone(), 5);

    let result = service.generate_quiz("lecture text").await;

    assert_eq!(client.calls(), 1, "structural failures must not retry");
    assert!(matches!(result, Err(AppError::QuizMalformed(_))));
}

#[actix_web::test]
async fn provider_failure_fails_without_a_second_call() {
    let client = ScriptedCompletionClient::new(vec![
        Err(AppError::CompletionFailed("provider down".to_string())),
        Ok(WELL_FORMED.to_string()),
    ]);
    let service = QuizGenerationService::new(client.clone(), 5);

    let result = service.generate_quiz("lecture text").await;

    assert_eq!(client.calls(), 1, "provider failures must not retry");
    assert!(matches!(result, Err(AppError::CompletionFailed(_))));
}

#[actix_web::test]
async fn no_partial_data_survives_a_malformed_run() {
    // Every reply is malformed in a different way; nothing must leak out.
    let client = ScriptedCompletionClient::new(vec![
        Ok(TRUNCATED.to_string()),
        Ok("[{'question': ".to_string()),
        Ok(String::new()),
    ]);
    let service = QuizGenerationService::new(client.clone(), 3);

    let result = service.generate_quiz("lecture text").await;

    assert_eq!(client.calls(), 3);
    assert!(matches!(result, Err(AppError::QuizParse(_))));
}
