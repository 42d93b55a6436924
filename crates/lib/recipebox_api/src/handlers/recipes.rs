//! Recipe collection endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use recipebox_core::models::{NewRecipe, Recipe};
use serde::Deserialize;
use serde_json::Value;

use crate::AppState;
use crate::error::{AppError, AppResult, INVALID_DATA};
use crate::models::{MessageResponse, RecipeCreatedResponse};

/// Query parameters for listing recipes.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    /// Case-insensitive filter over name, ingredients and instructions.
    pub keyword: Option<String>,
}

/// `GET /api/recipes[?keyword=]` — list or search recipes.
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = state
        .recipes
        .search(query.keyword.as_deref())
        .await?;
    Ok(Json(recipes))
}

/// `POST /api/recipes` — validate, assign an id and append.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RecipeCreatedResponse>)> {
    let Json(body) = payload.map_err(|e| AppError::invalid(INVALID_DATA, e.body_text()))?;
    let new = NewRecipe::from_json(body).map_err(|e| AppError::invalid(INVALID_DATA, e))?;

    let recipe = state.recipes.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeCreatedResponse {
            message: "レシピを保存しました！".into(),
            id: recipe.id().unwrap_or_default().to_string(),
        }),
    ))
}

/// `DELETE /api/recipes/{id}` — remove one recipe.
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let removed = state.recipes.delete(&id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("no recipe with id {id}")));
    }
    Ok(Json(MessageResponse {
        message: "レシピを削除しました！".into(),
    }))
}
