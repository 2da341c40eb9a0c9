use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;

use common::{delete, get, post_json, send, text, Reply, ScriptedGenerator, FIVE_SENTENCES};

#[tokio::test]
async fn test_root_banner() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("LexiDeck API is running."));
}

#[tokio::test]
async fn test_health_reports_database() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    let (status, body) = send(&app, get("/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/health/info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "lexideck-backend");
}

#[tokio::test]
async fn test_404_not_found() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, get("/nonexistent/path")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_add_word_created() {
    let generator = ScriptedGenerator::new([text(FIVE_SENTENCES)]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["word"], "apple");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["message"], "5 sentences were generated and saved.");

    let (status, body) = send(&app, get("/api/words")).await;
    assert_eq!(status, StatusCode::OK);
    let words = body.as_array().unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0]["word"], "apple");
    assert_eq!(words[0]["language"], "en-US");
    assert_eq!(words[0]["status"], "learning");
}

#[tokio::test]
async fn test_add_word_requires_word() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, post_json("/api/words/add", json!({ "language": "en-US" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The word is required.");
    assert!(body.get("error").is_none());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_add_word_rejects_malformed_json() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/words/add")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_add_duplicate_word_conflict() {
    let generator = ScriptedGenerator::new([text(FIVE_SENTENCES)]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, _) = send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This word has already been added.");
}

#[tokio::test]
async fn test_add_word_generation_failure() {
    let generator = ScriptedGenerator::new([Reply::Fail]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to add word and generate sentences.");
    assert!(body["error"].is_string());

    let (_, body) = send(&app, get("/api/words")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_lesson_flow() {
    let generator = ScriptedGenerator::new([text("1. The apple is red.")]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, get("/api/words/lesson/start")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());

    send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;

    let (status, lesson) = send(&app, get("/api/words/lesson/start")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lesson["sentence_text"], "The apple is red.");

    generator.push(text("CORRECT"));
    let check = json!({
        "sentenceId": lesson["id"],
        "wordId": lesson["word_id"],
        "originalSentence": lesson["sentence_text"],
        "userAnswer": "A maçã é vermelha."
    });
    let (status, body) = send(&app, post_json("/api/words/lesson/check", check)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["wordLearned"], true);
    assert_eq!(body["remaining"], 0);

    let (status, _) = send(&app, get("/api/words/lesson/start")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, words) = send(&app, get("/api/words")).await;
    assert_eq!(words[0]["status"], "learned");
}

#[tokio::test]
async fn test_incorrect_answer_response() {
    let generator = ScriptedGenerator::new([text("1. One.\n2. Two."), text("WRONG")]);
    let (app, _) = common::create_test_app(&generator).await;
    send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;

    let check = json!({
        "sentenceId": 1,
        "wordId": 1,
        "originalSentence": "One.",
        "userAnswer": "Dois."
    });
    let (status, body) = send(&app, post_json("/api/words/lesson/check", check)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert!(body.get("wordLearned").is_none());
    assert!(body.get("remaining").is_none());
}

#[tokio::test]
async fn test_check_answer_sentence_of_other_word() {
    let generator = ScriptedGenerator::new([text("1. One."), text("1. Uno."), text("CORRECT")]);
    let (app, _) = common::create_test_app(&generator).await;
    let (_, first) = send(&app, post_json("/api/words/add", json!({ "word": "one" }))).await;
    let (_, second) = send(&app, post_json("/api/words/add", json!({ "word": "uno" }))).await;

    // Sentence ids follow insertion order: the first word owns sentence 1.
    let check = json!({
        "sentenceId": 1,
        "wordId": second["id"],
        "originalSentence": "One.",
        "userAnswer": "Um."
    });
    let (status, body) = send(&app, post_json("/api/words/lesson/check", check)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Sentence not found.");

    let (_, words) = send(&app, get("/api/words")).await;
    assert_eq!(words[0]["word"], "one");
    assert_eq!(words[0]["status"], "learning");
    assert_eq!(first["word"], "one");
}

#[tokio::test]
async fn test_check_answer_missing_fields() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let check = json!({ "sentenceId": 1, "wordId": 1, "originalSentence": "Hi." });
    let (status, body) = send(&app, post_json("/api/words/lesson/check", check)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Not enough data to check the answer.");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_delete_word() {
    let generator = ScriptedGenerator::new([text(FIVE_SENTENCES)]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, _) = send(&app, delete("/api/words/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, added) = send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;
    let id = added["id"].as_i64().unwrap();

    let (status, body) = send(&app, delete(&format!("/api/words/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, get(&format!("/api/words/{id}/detail"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_word_detail_rejects_non_numeric_id() {
    let generator = ScriptedGenerator::empty();
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, get("/api/words/abc/detail")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_word_detail_found() {
    let generator = ScriptedGenerator::new([text(FIVE_SENTENCES), text("Meanings of apple.")]);
    let state = common::test_state(&generator, true).await;
    let app = lexideck_backend::create_app(state);

    let (_, added) = send(&app, post_json("/api/words/add", json!({ "word": "apple" }))).await;
    let id = added["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/api/words/{id}/detail"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], "apple");
    assert_eq!(body["detail"], "Meanings of apple.");
}

#[tokio::test]
async fn test_listening_start() {
    let generator = ScriptedGenerator::new([text(common::LISTENING_REPLY), text("no markers here")]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, body) = send(&app, get("/api/listening/start")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "The library opens at nine.");
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, get("/api/listening/start")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to generate listening lesson.");
}

#[tokio::test]
async fn test_listening_check() {
    let generator = ScriptedGenerator::new([text("Great job.")]);
    let (app, _) = common::create_test_app(&generator).await;

    let (status, _) = send(&app, post_json("/api/listening/check", json!({ "text": "Hi." }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let submission = json!({
        "text": "The library opens at nine.",
        "questions": ["When?", "What?", "Early?"],
        "answers": ["Nine", "Library", "Yes"]
    });
    let (status, body) = send(&app, post_json("/api/listening/check", submission)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedback"], "Great job.");
}
