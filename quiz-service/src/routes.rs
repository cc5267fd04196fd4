use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use quiz_store::model::{
    AnswerSubmission, MediaItem, MediaUpload, PhoneRecord, PhoneRegistration, Question, Stats,
    StudentAnswer,
};

use crate::config::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct PostQuestionRequest {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAnswerRequest {
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Deserialize)]
pub struct ResetAllRequest {
    #[serde(rename = "confirmPassword", default)]
    confirm_password: String,
}

pub async fn get_questions(State(state): State<AppState>) -> Json<Vec<Question>> {
    let store = state.store.read().expect("quiz store lock poisoned");
    Json(store.questions().to_vec())
}

pub async fn post_question(
    State(state): State<AppState>,
    Json(request): Json<PostQuestionRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    let question = store.create_question(request.question, request.answer)?;

    Ok(Json(json!({
        "success": true,
        "message": "Question posted successfully",
        "question": question,
    })))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let store = state.store.read().expect("quiz store lock poisoned");
    let question = store.question(id)?.clone();
    Ok(Json(question))
}

pub async fn put_question_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAnswerRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    let question = store.set_answer(id, request.answer)?;

    Ok(Json(json!({ "success": true, "question": question })))
}

pub async fn delete_questions_reset(State(state): State<AppState>) -> Json<Value> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    store.reset_questions();

    Json(json!({ "success": true, "message": "All questions deleted" }))
}

pub async fn get_answers(State(state): State<AppState>) -> Json<Vec<StudentAnswer>> {
    let store = state.store.read().expect("quiz store lock poisoned");
    Json(store.answers().to_vec())
}

pub async fn get_question_answers(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> Json<Vec<StudentAnswer>> {
    let store = state.store.read().expect("quiz store lock poisoned");
    Json(store.answers_for_question(question_id))
}

pub async fn post_answer(
    State(state): State<AppState>,
    Json(submission): Json<AnswerSubmission>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    let answer = store.submit_answer(submission)?;

    Ok(Json(json!({
        "success": true,
        "message": "Answer submitted successfully",
        "answer": answer,
    })))
}

pub async fn get_media(State(state): State<AppState>) -> Json<Vec<MediaItem>> {
    let store = state.store.read().expect("quiz store lock poisoned");
    Json(store.media().to_vec())
}

pub async fn post_media(
    State(state): State<AppState>,
    Json(upload): Json<MediaUpload>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    let media = store.upload_media(upload)?;

    Ok(Json(json!({
        "success": true,
        "message": "Media uploaded successfully",
        "media": media,
    })))
}

pub async fn get_latest_media(
    State(state): State<AppState>,
) -> Result<Json<MediaItem>, ApiError> {
    let store = state.store.read().expect("quiz store lock poisoned");
    let media = store.latest_media()?.clone();
    Ok(Json(media))
}

pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    store.delete_media(id)?;

    Ok(Json(json!({ "success": true, "message": "Media deleted successfully" })))
}

pub async fn get_phones(State(state): State<AppState>) -> Json<BTreeMap<String, PhoneRecord>> {
    let store = state.store.read().expect("quiz store lock poisoned");
    Json(store.phones().clone())
}

pub async fn post_phone(
    State(state): State<AppState>,
    Json(registration): Json<PhoneRegistration>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    store.register_phone(registration)?;

    Ok(Json(json!({ "success": true, "message": "Phone registered successfully" })))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let store = state.store.read().expect("quiz store lock poisoned");
    Json(store.stats())
}

pub async fn post_reset_all(
    State(state): State<AppState>,
    Json(request): Json<ResetAllRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.write().expect("quiz store lock poisoned");
    store.reset_all(&request.confirm_password)?;
    info!("all collections reset");

    Ok(Json(json!({ "success": true, "message": "All data has been reset" })))
}

pub async fn get_api_info() -> Json<Value> {
    Json(json!({
        "message": "Quiz API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Learn something new every day!",
        "endpoints": {
            "questions": "/questions",
            "answers": "/answers (supports type: 'question' or 'media')",
            "media": "/media",
            "phones": "/phones",
            "stats": "/stats",
        },
        "features": [
            "Daily questions",
            "Media uploads (images/audio)",
            "Student responses to media",
            "Phone number tracking",
        ],
    }))
}

pub async fn get_health(State(state): State<AppState>) -> Json<Value> {
    let counts = state.store.read().expect("quiz store lock poisoned").counts();

    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "dataStats": counts,
    }))
}

pub async fn fallback(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": "Please check the API documentation",
            "requestedPath": uri.path(),
        })),
    )
}
