use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;

/// Recipes the user picked for the next shopping trip.
///
/// Owned by exactly one component and handed to the list builder by
/// reference. Every mutation bumps `revision` so that work started against
/// an older selection can be recognised as stale.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RecipeSelection {
    recipes: Vec<Recipe>,
    #[serde(skip)]
    revision: u64,
}

impl RecipeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe unless one with the same id is already selected.
    ///
    /// Returns `true` when the selection changed.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        if self.contains(&recipe.id) {
            return false;
        }

        tracing::debug!(recipe_id = %recipe.id, title = %recipe.title, "recipe selected");

        self.recipes.push(recipe);
        self.revision += 1;
        true
    }

    pub fn remove(&mut self, recipe_id: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != recipe_id);

        if self.recipes.len() == before {
            return false;
        }

        tracing::debug!(recipe_id = %recipe_id, "recipe deselected");

        self.revision += 1;
        true
    }

    pub fn clear(&mut self) {
        if self.recipes.is_empty() {
            return;
        }

        self.recipes.clear();
        self.revision += 1;
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.recipes.iter().any(|r| r.id == recipe_id)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn titles(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Serializes the selected recipes for persistence between sessions.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.recipes)
    }

    /// Restores a selection saved with [`RecipeSelection::to_json`].
    ///
    /// Duplicate ids in the saved payload are collapsed to the first one.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        let mut selection = Self::new();
        for recipe in recipes {
            selection.add(recipe);
        }

        Ok(selection)
    }
}

impl From<Vec<Recipe>> for RecipeSelection {
    fn from(recipes: Vec<Recipe>) -> Self {
        let mut selection = Self::new();
        for recipe in recipes {
            selection.add(recipe);
        }

        selection
    }
}
