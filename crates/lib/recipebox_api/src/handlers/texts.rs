//! Text blob endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;

use crate::AppState;
use crate::error::{AppError, AppResult, INVALID_DATA};
use crate::models::MessageResponse;

/// `GET /api/texts` — the stored value, or `[]` when nothing was saved.
pub async fn get_texts_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let value = state.texts.load().await?;
    Ok(Json(value))
}

/// `POST /api/texts` — replace the stored value with the request body.
pub async fn save_texts_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(value) = payload.map_err(|e| AppError::invalid(INVALID_DATA, e.body_text()))?;
    state.texts.save(&value).await?;
    Ok(Json(MessageResponse {
        message: "Data saved successfully.".into(),
    }))
}
