//! Recipe generation through an external chat-completion API.
//!
//! [`RecipeGenerator`] is the seam handlers depend on; [`openai::OpenAiClient`]
//! is the production implementation. Calls are single-shot: no retry, no
//! backoff, no caching.

pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A generated recipe as returned by the model: a JSON object, expected to
/// carry `recipe_name`, `ingredients` and `instructions`.
pub type GeneratedRecipe = Map<String, Value>;

/// Errors from the completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed completion: {0}")]
    Malformed(String),
}

/// Something that can turn an ingredient list into a recipe.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(&self, ingredients: &str) -> Result<GeneratedRecipe, CompletionError>;

    /// Identifier for logging.
    fn name(&self) -> &str;
}

/// Parse the model's message content, which must be a JSON object.
pub fn parse_recipe_content(content: &str) -> Result<GeneratedRecipe, CompletionError> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(recipe)) => Ok(recipe),
        Ok(other) => Err(CompletionError::Malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CompletionError::Malformed(format!("content is not JSON: {e}"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_content_parses() {
        let recipe = parse_recipe_content(
            r#"{"recipe_name": "親子丼", "ingredients": "鶏肉, 卵", "instructions": "煮る"}"#,
        )
        .unwrap();
        assert_eq!(recipe["recipe_name"], "親子丼");
        assert_eq!(recipe.len(), 3);
    }

    #[test]
    fn non_object_content_is_malformed() {
        let err = parse_recipe_content(r#"["egg"]"#).unwrap_err();
        assert!(matches!(err, CompletionError::Malformed(m) if m.contains("an array")));
    }

    #[test]
    fn prose_content_is_malformed() {
        let err = parse_recipe_content("Here is your recipe!").unwrap_err();
        assert!(matches!(err, CompletionError::Malformed(_)));
    }
}
