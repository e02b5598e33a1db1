//! Recipes and the catalog they come from.
//!
//! A [`Recipe`] is the solution to a puzzle: the order of its ingredients is
//! the order the slots must be filled in. Recipes are grouped in a
//! [`Catalog`] keyed by language code, so switching language swaps the whole
//! puzzle.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Language code used when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "english";

/// Errors raised while loading or validating recipes
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No recipe for language '{0}'")]
    UnknownLanguage(String),

    #[error("Recipe '{0}' has no ingredients")]
    EmptyRecipe(String),

    #[error("Recipe '{recipe}' lists '{name}' more than once")]
    DuplicateIngredient { recipe: String, name: String },

    #[error("Recipe '{recipe}' has {found} hints, {required} required")]
    NotEnoughHints {
        recipe: String,
        found: usize,
        required: usize,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single ingredient. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: String,
    /// Negative for decoys
    pub points: i32,
}

impl Ingredient {
    pub fn new(name: &str, category: &str, points: i32) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            points,
        }
    }
}

/// A recipe: ingredients in their correct order, plus hint texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub hints: Vec<String>,
}

impl Recipe {
    /// Number of slots a puzzle built from this recipe has
    pub fn slot_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Whether the recipe uses an ingredient with this name
    pub fn contains(&self, name: &str) -> bool {
        self.ingredients.iter().any(|i| i.name == name)
    }

    /// Check the recipe is playable
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.ingredients.is_empty() {
            return Err(CatalogError::EmptyRecipe(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for ingredient in &self.ingredients {
            if !seen.insert(ingredient.name.as_str()) {
                return Err(CatalogError::DuplicateIngredient {
                    recipe: self.name.clone(),
                    name: ingredient.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Check there is a hint text for every hint use
    pub fn validate_hints(&self, uses: u8) -> Result<(), CatalogError> {
        if self.hints.len() < uses as usize {
            return Err(CatalogError::NotEnoughHints {
                recipe: self.name.clone(),
                found: self.hints.len(),
                required: uses as usize,
            });
        }
        Ok(())
    }

    /// Spaghetti Carbonara, the stock puzzle
    pub fn carbonara() -> Self {
        Self {
            name: "Spaghetti Carbonara".to_string(),
            ingredients: vec![
                Ingredient::new("Spaghetti", "pasta", 10),
                Ingredient::new("Eggs", "protein", 15),
                Ingredient::new("Pecorino Romano", "cheese", 20),
                Ingredient::new("Guanciale", "meat", 25),
                Ingredient::new("Black Pepper", "spice", 10),
            ],
            hints: vec![
                "The main protein comes from both meat and eggs".to_string(),
                "You'll need a hard Italian cheese".to_string(),
                "Don't forget the classic black spice".to_string(),
            ],
        }
    }

    /// Italian-language carbonara
    pub fn carbonara_italiano() -> Self {
        Self {
            name: "Spaghetti alla Carbonara".to_string(),
            ingredients: vec![
                Ingredient::new("Spaghetti", "pasta", 10),
                Ingredient::new("Uova", "proteine", 15),
                Ingredient::new("Pecorino Romano", "formaggio", 20),
                Ingredient::new("Guanciale", "carne", 25),
                Ingredient::new("Pepe Nero", "spezie", 10),
            ],
            hints: vec![
                "Le proteine arrivano sia dalla carne che dalle uova".to_string(),
                "Serve un formaggio italiano stagionato".to_string(),
                "Non dimenticare la classica spezia nera".to_string(),
            ],
        }
    }
}

/// Recipes keyed by language code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    recipes: BTreeMap<String, Recipe>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            recipes: BTreeMap::new(),
        }
    }

    /// The catalog shipped with the game
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(DEFAULT_LANGUAGE, Recipe::carbonara());
        catalog.insert("italiano", Recipe::carbonara_italiano());
        catalog
    }

    /// Parse a catalog from a JSON object of `language -> recipe`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let recipes: BTreeMap<String, Recipe> = serde_json::from_str(json)?;
        for recipe in recipes.values() {
            recipe.validate()?;
        }
        Ok(Self { recipes })
    }

    /// Add or replace the recipe for a language
    pub fn insert(&mut self, language: &str, recipe: Recipe) {
        self.recipes.insert(language.to_string(), recipe);
    }

    /// Look up the recipe for a language
    pub fn recipe(&self, language: &str) -> Result<&Recipe, CatalogError> {
        self.recipes
            .get(language)
            .ok_or_else(|| CatalogError::UnknownLanguage(language.to_string()))
    }

    /// All language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        self.recipes.keys().map(String::as_str).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.languages(), vec!["english", "italiano"]);

        let recipe = catalog.recipe("english").unwrap();
        assert_eq!(recipe.name, "Spaghetti Carbonara");
        assert_eq!(recipe.slot_count(), 5);
        assert_eq!(recipe.hints.len(), 3);
        assert!(recipe.validate().is_ok());
    }

    #[test]
    fn test_unknown_language() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.recipe("klingon"),
            Err(CatalogError::UnknownLanguage(lang)) if lang == "klingon"
        ));
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "english": {
                "name": "Toast",
                "ingredients": [
                    { "name": "Bread", "category": "grain", "points": 5 },
                    { "name": "Butter", "category": "dairy", "points": 5 }
                ],
                "hints": ["a", "b", "c"]
            }
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        let recipe = catalog.recipe("english").unwrap();
        assert_eq!(recipe.name, "Toast");
        assert_eq!(recipe.ingredients[1], Ingredient::new("Butter", "dairy", 5));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let json = r#"{
            "english": {
                "name": "Toast",
                "ingredients": [
                    { "name": "Bread", "category": "grain", "points": 5 },
                    { "name": "Bread", "category": "grain", "points": 5 }
                ],
                "hints": []
            }
        }"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateIngredient { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_hints() {
        let mut recipe = Recipe::carbonara();
        assert!(recipe.validate_hints(3).is_ok());

        recipe.hints.pop();
        assert!(matches!(
            recipe.validate_hints(3),
            Err(CatalogError::NotEnoughHints { found: 2, required: 3, .. })
        ));
    }
}
