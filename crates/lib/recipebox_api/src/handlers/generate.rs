//! AI recipe generation endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use recipebox_core::completion::GeneratedRecipe;
use recipebox_core::models::GenerateRequest;
use serde_json::Value;
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult, INGREDIENTS_REQUIRED};

/// `POST /api/generate-recipe` — ask the completion API for a recipe built
/// from `ingredients` and return the JSON object it produced.
///
/// Input is validated before the credential check, so a blank request is a
/// 400 even on a server without an API key.
pub async fn generate_recipe_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<GeneratedRecipe>> {
    let Json(body) =
        payload.map_err(|e| AppError::invalid(INGREDIENTS_REQUIRED, e.body_text()))?;
    let request =
        GenerateRequest::from_json(body).map_err(|e| AppError::invalid(INGREDIENTS_REQUIRED, e))?;

    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| AppError::Misconfigured("OPENAI_API_KEY is not set".into()))?;

    info!(generator = generator.name(), "generating recipe");
    let recipe = generator.generate(&request.ingredients).await?;
    Ok(Json(recipe))
}
