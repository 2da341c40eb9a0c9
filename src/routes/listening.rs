use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::AppError;
use crate::services::listening::{ListeningAnswers, ListeningExercise};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CheckListeningRequest {
    text: Option<String>,
    questions: Option<Vec<String>>,
    answers: Option<Vec<String>>,
}

#[derive(Serialize)]
struct FeedbackResponse {
    feedback: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", get(start))
        .route("/check", post(check))
}

async fn start(State(state): State<AppState>) -> Result<Json<ListeningExercise>, AppError> {
    state
        .listening()
        .start()
        .await
        .map(Json)
        .map_err(|err| AppError::from_service(err, "Failed to generate listening lesson."))
}

async fn check(
    State(state): State<AppState>,
    payload: Result<Json<CheckListeningRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let (Some(text), Some(questions), Some(answers)) = (body.text, body.questions, body.answers) else {
        return Err(AppError::bad_request("Not enough data to check the answers."));
    };

    let submission = ListeningAnswers {
        text,
        questions,
        answers,
    };
    state
        .listening()
        .check(&submission)
        .await
        .map(|feedback| Json(FeedbackResponse { feedback }))
        .map_err(|err| AppError::from_service(err, "Failed to process the answers."))
}
