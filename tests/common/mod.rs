#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use tower::ServiceExt;

use lexideck_backend::config::LessonSettings;
use lexideck_backend::db::config::DbConfig;
use lexideck_backend::db::operations::content::Sentence;
use lexideck_backend::db::Database;
use lexideck_backend::services::llm_provider::{LLMError, TextGenerator};
use lexideck_backend::state::AppState;

pub const FIVE_SENTENCES: &str = "1. The apple is red.\n2. She ate an apple.\n3. An apple a day keeps the doctor away.\n4. He sliced the apple.\n5. Apple pie is my favourite dessert.\n";

pub const LISTENING_REPLY: &str = "[START_TEXT]\nThe library opens at nine.\n[END_TEXT]\n[START_QUESTIONS]\n1. When does it open?\n2. What opens?\n3. Is it early?\n[END_QUESTIONS]";

pub enum Reply {
    Text(String),
    Fail,
}

pub fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

/// Replays canned completions in order and records every prompt it receives.
/// An exhausted script answers with an error.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::<Reply>::new())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().push_back(reply);
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        self.prompts.lock().push(prompt.to_string());
        match self.replies.lock().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail) | None => Err(LLMError::EmptyChoices),
        }
    }
}

/// Answers every prompt with the same text after a fixed delay.
pub struct SlowGenerator {
    delay: Duration,
    reply: String,
}

impl SlowGenerator {
    pub fn new(delay: Duration, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            delay,
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for SlowGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LLMError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

pub fn settings(generate_details: bool) -> LessonSettings {
    LessonSettings {
        generate_details,
        ..LessonSettings::default()
    }
}

pub async fn test_state(generator: &Arc<ScriptedGenerator>, generate_details: bool) -> AppState {
    let db = Database::in_memory().await.expect("in-memory database");
    let generator: Arc<dyn TextGenerator> = generator.clone();
    AppState::new(db, generator, settings(generate_details))
}

/// State backed by a database file under `dir`, with a short busy timeout so
/// lock waits surface quickly.
pub async fn file_state(dir: &tempfile::TempDir, generator: Arc<dyn TextGenerator>) -> AppState {
    let config = DbConfig {
        url: format!("sqlite:{}?mode=rwc", dir.path().join("deck.db").display()),
        busy_timeout: Duration::from_millis(500),
        ..DbConfig::default()
    };
    let db = Database::connect(&config).await.expect("file database");
    AppState::new(db, generator, settings(false))
}

pub async fn sentences_of(state: &AppState, word_id: i64) -> Vec<Sentence> {
    sqlx::query_as::<_, (i64, i64, String)>(
        r#"SELECT "id", "word_id", "sentence_text" FROM "sentences" WHERE "word_id" = ? ORDER BY "id""#,
    )
    .bind(word_id)
    .fetch_all(state.db().pool())
    .await
    .expect("sentences query")
    .into_iter()
    .map(|(id, word_id, sentence_text)| Sentence {
        id,
        word_id,
        sentence_text,
    })
    .collect()
}

pub async fn create_test_app(generator: &Arc<ScriptedGenerator>) -> (Router, AppState) {
    let state = test_state(generator, false).await;
    (lexideck_backend::create_app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
