use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::operations::content::{Sentence, Word, WordDetail};
use crate::response::AppError;
use crate::services::words::{CheckOutcome, TranslationCheck};
use crate::services::ServiceError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AddWordRequest {
    word: Option<String>,
    language: Option<String>,
}

#[derive(Serialize)]
struct AddWordResponse {
    id: i64,
    word: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckAnswerRequest {
    sentence_id: Option<i64>,
    word_id: Option<i64>,
    original_sentence: Option<String>,
    user_answer: Option<String>,
}

impl CheckAnswerRequest {
    fn into_check(self) -> Result<TranslationCheck, ServiceError> {
        match (self.sentence_id, self.word_id, self.original_sentence, self.user_answer) {
            (Some(sentence_id), Some(word_id), Some(original_sentence), Some(user_answer)) => {
                Ok(TranslationCheck {
                    sentence_id,
                    word_id,
                    original_sentence,
                    user_answer,
                })
            }
            _ => Err(ServiceError::invalid("Not enough data to check the answer.")),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckAnswerResponse {
    correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_learned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining: Option<i64>,
    message: String,
}

impl From<CheckOutcome> for CheckAnswerResponse {
    fn from(outcome: CheckOutcome) -> Self {
        match outcome {
            CheckOutcome::Incorrect => Self {
                correct: false,
                word_learned: None,
                remaining: None,
                message: "Incorrect answer.".to_string(),
            },
            CheckOutcome::Correct {
                word_learned: true,
                remaining,
            } => Self {
                correct: true,
                word_learned: Some(true),
                remaining: Some(remaining),
                message: "Correct answer! Word completed!".to_string(),
            },
            CheckOutcome::Correct {
                word_learned: false,
                remaining,
            } => Self {
                correct: true,
                word_learned: Some(false),
                remaining: Some(remaining),
                message: format!("Correct answer! {remaining} sentences left."),
            },
        }
    }
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words))
        .route("/add", post(add_word))
        .route("/lesson/start", get(start_lesson))
        .route("/lesson/check", post(check_answer))
        .route("/:id", delete(delete_word))
        .route("/:id/detail", get(word_detail))
}

async fn list_words(State(state): State<AppState>) -> Result<Json<Vec<Word>>, AppError> {
    state
        .words()
        .list_words()
        .await
        .map(Json)
        .map_err(|err| AppError::from_service(err, "Failed to fetch words."))
}

async fn add_word(
    State(state): State<AppState>,
    payload: Result<Json<AddWordRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let word = body
        .word
        .filter(|w| !w.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("The word is required."))?;

    let added = state
        .words()
        .add_word(&word, body.language.as_deref())
        .await
        .map_err(|err| AppError::from_service(err, "Failed to add word and generate sentences."))?;

    let response = AddWordResponse {
        id: added.id,
        message: format!("{} sentences were generated and saved.", added.sentence_count),
        word: added.word,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

async fn start_lesson(State(state): State<AppState>) -> Result<Json<Sentence>, AppError> {
    match state.lessons().next_sentence().await {
        Ok(Some(sentence)) => Ok(Json(sentence)),
        Ok(None) => Err(AppError::not_found("Congratulations! No new sentences to learn.")),
        Err(err) => Err(AppError::from_service(err, "Failed to start lesson.")),
    }
}

async fn check_answer(
    State(state): State<AppState>,
    payload: Result<Json<CheckAnswerRequest>, JsonRejection>,
) -> Result<Json<CheckAnswerResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let check = body
        .into_check()
        .map_err(|err| AppError::from_service(err, "Failed to check answer."))?;

    state
        .words()
        .check_translation(&check)
        .await
        .map(|outcome| Json(outcome.into()))
        .map_err(|err| AppError::from_service(err, "Failed to check answer."))
}

async fn delete_word(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(word_id) = id.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    state
        .words()
        .delete_word(word_id)
        .await
        .map_err(|err| AppError::from_service(err, "Server error while deleting the word."))?;

    Ok(Json(MessageResponse {
        message: "Word and its sentences were deleted.",
    }))
}

async fn word_detail(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<WordDetail>, AppError> {
    let Path(word_id) = id.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    state
        .words()
        .word_detail(word_id)
        .await
        .map(Json)
        .map_err(|err| AppError::from_service(err, "Failed to fetch word detail."))
}
