//! Response bodies.

use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Acknowledgement for successful writes.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgement for a created recipe.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCreatedResponse {
    pub message: String,
    pub id: String,
}
