//! Recipe collection store.
//!
//! The whole collection is one JSON array. Mutations hold the store lock for
//! the full load-modify-save sequence, so concurrent requests in this
//! process cannot overwrite each other's changes. Other processes writing
//! the same file are not coordinated with.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{StorageError, read_json, write_json};
use crate::ids::new_recipe_id;
use crate::models::{NewRecipe, Recipe, filter_by_keyword};

/// Default file name for the recipe collection.
pub const DEFAULT_RECIPES_FILE: &str = "recipes.json";

#[derive(Debug)]
pub struct RecipeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recipes in stored order. A missing file is an empty collection.
    pub async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    /// Recipes whose name, ingredients or instructions contain `keyword`,
    /// ignoring case. `None` or an empty keyword lists everything.
    pub async fn search(&self, keyword: Option<&str>) -> Result<Vec<Recipe>, StorageError> {
        let recipes = self.list().await?;
        Ok(match keyword {
            Some(k) => filter_by_keyword(recipes, k),
            None => recipes,
        })
    }

    /// Assign an id to `new`, append it and persist the collection.
    pub async fn create(&self, new: NewRecipe) -> Result<Recipe, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.list().await?;

        let id = {
            let taken: HashSet<&str> = recipes.iter().filter_map(Recipe::id).collect();
            let mut id = new_recipe_id();
            while taken.contains(id.as_str()) {
                id = new_recipe_id();
            }
            id
        };

        let recipe = new.into_recipe(id);
        recipes.push(recipe.clone());
        write_json(&self.path, &recipes).await?;

        info!(id = recipe.id().unwrap_or_default(), total = recipes.len(), "recipe created");
        Ok(recipe)
    }

    /// Remove the recipe with `id`.
    ///
    /// Returns `false`, without touching the file, when no recipe matches.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.list().await?;

        let before = recipes.len();
        recipes.retain(|r| r.id() != Some(id));
        if recipes.len() == before {
            debug!(id, "delete target not found");
            return Ok(false);
        }

        write_json(&self.path, &recipes).await?;
        info!(id, total = recipes.len(), "recipe deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    fn new_recipe(name: &str) -> NewRecipe {
        NewRecipe::from_json(json!({
            "recipe_name": name,
            "ingredients": "egg, butter",
            "instructions": "whisk and fry"
        }))
        .unwrap()
    }

    fn store_in(dir: &tempfile::TempDir) -> RecipeStore {
        RecipeStore::new(dir.path().join(DEFAULT_RECIPES_FILE))
    }

    #[tokio::test]
    async fn missing_file_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids_in_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let a = store.create(new_recipe("A")).await.unwrap();
        let b = store.create(new_recipe("B")).await.unwrap();
        assert!(a.id().is_some_and(|id| !id.is_empty()));
        assert_ne!(a.id(), b.id());

        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|r| r.recipe_name().to_string())
            .collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let a = store.create(new_recipe("A")).await.unwrap();
        let b = store.create(new_recipe("B")).await.unwrap();

        assert!(store.delete(a.id().unwrap()).await.unwrap());
        assert_eq!(store.list().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn delete_miss_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_recipe("A")).await.unwrap();
        let before = std::fs::read(store.path()).unwrap();

        assert!(!store.delete("no-such-id").await.unwrap());
        assert!(!store.delete("no-such-id").await.unwrap());
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn delete_miss_on_empty_store_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.delete("x").await.unwrap());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn legacy_records_without_ids_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"[{"recipe_name": "カレー", "ingredients": "肉, じゃがいも"}]"#,
        )
        .unwrap();

        store.create(new_recipe("B")).await.unwrap();
        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id().is_none());
        assert_eq!(all[0].recipe_name(), "カレー");
    }

    #[tokio::test]
    async fn legacy_records_are_rewritten_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let legacy = json!([
            {"recipe_name": null, "ingredients": "egg"},
            {"recipe_name": "Toast"},
            {"recipe_name": "Stew", "ingredients": 7, "instructions": ["chop", "simmer"]}
        ]);
        std::fs::write(store.path(), legacy.to_string()).unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].recipe_name(), "");
        assert_eq!(all[2].ingredients(), "");
        assert_eq!(store.search(Some("EGG")).await.unwrap().len(), 1);

        let created = store.create(new_recipe("Omelette")).await.unwrap();
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let on_disk = on_disk.as_array().unwrap();
        assert_eq!(on_disk.len(), 4);
        assert_eq!(on_disk[..3], legacy.as_array().unwrap()[..]);

        assert!(store.delete(created.id().unwrap()).await.unwrap());
        let after: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(after, legacy);
    }

    #[tokio::test]
    async fn corrupt_file_fails_delete_at_read_stage() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "[{").unwrap();

        let err = store.delete("anything").await.unwrap_err();
        assert_eq!(err.op(), crate::storage::StorageOp::Read);
    }

    #[tokio::test]
    async fn search_filters_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .create(
                NewRecipe::from_json(json!({
                    "recipe_name": "Tomato Soup",
                    "ingredients": "tomato, salt",
                    "instructions": "boil"
                }))
                .unwrap(),
            )
            .await
            .unwrap();
        store.create(new_recipe("Omelette")).await.unwrap();

        let hits = store.search(Some("TOMATO")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recipe_name(), "Tomato Soup");
        assert!(store.search(Some("pepper")).await.unwrap().is_empty());
        assert_eq!(store.search(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_creates_are_all_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(new_recipe(&format!("R{i}"))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.unwrap().len(), 16);
    }
}
