//! Record types for stored recipes and incoming payloads.
//!
//! Request bodies arrive as untyped JSON and are validated here into typed
//! payloads, so handlers never look up fields ad hoc.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Payload validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field `{0}` must be a string")]
    NotAString(&'static str),

    #[error("field `{0}` must not be blank")]
    Blank(&'static str),
}

/// A stored recipe.
///
/// The record is kept as the JSON object it was stored as, so fields this
/// service does not know about, and values of unexpected types written by
/// older revisions, are saved back untouched. The accessors read the
/// recognised fields as text, treating a missing, null or non-string value
/// as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(Map<String, Value>);

impl Recipe {
    /// Server-assigned id. `None` for records saved before ids existed.
    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn recipe_name(&self) -> &str {
        self.text("recipe_name").unwrap_or_default()
    }

    pub fn ingredients(&self) -> &str {
        self.text("ingredients").unwrap_or_default()
    }

    pub fn instructions(&self) -> &str {
        self.text("instructions").unwrap_or_default()
    }

    /// All fields as stored.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Case-insensitive substring match against name, ingredients and
    /// instructions. `needle` must already be lowercased.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        [self.recipe_name(), self.ingredients(), self.instructions()]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Keep only the recipes matching `keyword`, preserving order.
///
/// An empty keyword matches everything.
pub fn filter_by_keyword(recipes: Vec<Recipe>, keyword: &str) -> Vec<Recipe> {
    if keyword.is_empty() {
        return recipes;
    }
    let needle = keyword.to_lowercase();
    recipes
        .into_iter()
        .filter(|r| r.matches_keyword(&needle))
        .collect()
}

/// A validated recipe submission, not yet assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub recipe_name: String,
    pub ingredients: String,
    pub instructions: String,
    pub extra: Map<String, Value>,
}

impl NewRecipe {
    /// Validate a submitted body.
    ///
    /// `recipe_name` is required; `ingredients` and `instructions` may be
    /// absent or null. A client-supplied `id` is discarded.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut fields) = value else {
            return Err(ValidationError::NotAnObject);
        };
        let recipe_name = match fields.remove("recipe_name") {
            Some(Value::String(name)) => name,
            Some(_) => return Err(ValidationError::NotAString("recipe_name")),
            None => return Err(ValidationError::MissingField("recipe_name")),
        };
        let ingredients = take_optional_string(&mut fields, "ingredients")?;
        let instructions = take_optional_string(&mut fields, "instructions")?;
        fields.remove("id");

        Ok(Self {
            recipe_name,
            ingredients,
            instructions,
            extra: fields,
        })
    }

    pub fn into_recipe(self, id: String) -> Recipe {
        let mut fields = self.extra;
        fields.insert("recipe_name".into(), Value::String(self.recipe_name));
        fields.insert("ingredients".into(), Value::String(self.ingredients));
        fields.insert("instructions".into(), Value::String(self.instructions));
        fields.insert("id".into(), Value::String(id));
        Recipe(fields)
    }
}

fn take_optional_string(
    fields: &mut Map<String, Value>,
    key: &'static str,
) -> Result<String, ValidationError> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::NotAString(key)),
    }
}

/// A validated recipe generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Free-text ingredient list, trimmed.
    pub ingredients: String,
}

impl GenerateRequest {
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = value else {
            return Err(ValidationError::NotAnObject);
        };
        let ingredients = match fields.get("ingredients") {
            Some(Value::String(s)) => s.trim(),
            Some(Value::Null) | None => return Err(ValidationError::MissingField("ingredients")),
            Some(_) => return Err(ValidationError::NotAString("ingredients")),
        };
        if ingredients.is_empty() {
            return Err(ValidationError::Blank("ingredients"));
        }
        Ok(Self {
            ingredients: ingredients.to_string(),
        })
    }
}
