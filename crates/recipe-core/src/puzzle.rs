//! Puzzle generation.
//!
//! This module contains:
//! - Difficulty tiers and the decoy set they add
//! - Pieces (draggable ingredient instances) and slots
//! - The generator that shuffles a recipe into a fresh puzzle

use crate::recipe::{Ingredient, Recipe};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique id of a piece within one puzzle instance
pub type PieceId = u32;

/// Difficulty tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    /// Adds decoy pieces that belong to no slot
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Decoy ingredients mixed into the tray at this tier
    pub fn decoys(&self) -> Vec<Ingredient> {
        match self {
            Difficulty::Easy | Difficulty::Medium => Vec::new(),
            Difficulty::Hard => vec![
                Ingredient::new("Cream", "dairy", -10),
                Ingredient::new("Garlic", "vegetable", -10),
            ],
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A draggable instance of an ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub ingredient: Ingredient,
    pub placed: bool,
}

impl Piece {
    pub fn name(&self) -> &str {
        &self.ingredient.name
    }

    pub fn points(&self) -> i32 {
        self.ingredient.points
    }
}

/// A position in the recipe sequence. Holds the piece dropped there, if any.
pub type Slot = Option<Piece>;

/// A freshly generated puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Shuffled tray of pieces, decoys included
    pub pieces: Vec<Piece>,
    /// One empty slot per recipe ingredient
    pub slots: Vec<Slot>,
    /// Categories present in the tray (display only)
    pub active_categories: BTreeSet<String>,
}

impl Puzzle {
    /// Generate a puzzle using the thread RNG
    pub fn generate(recipe: &Recipe, difficulty: Difficulty) -> Self {
        Self::generate_with_rng(recipe, difficulty, &mut rand::thread_rng())
    }

    /// Generate a puzzle from a recipe.
    ///
    /// Decoys whose name collides with a recipe ingredient are skipped so that
    /// names stay unique across the tray.
    pub fn generate_with_rng<R: Rng>(recipe: &Recipe, difficulty: Difficulty, rng: &mut R) -> Self {
        let mut ingredients = recipe.ingredients.clone();
        ingredients.extend(
            difficulty
                .decoys()
                .into_iter()
                .filter(|decoy| !recipe.contains(&decoy.name)),
        );

        let active_categories = ingredients.iter().map(|i| i.category.clone()).collect();

        ingredients.shuffle(rng);

        // Ids follow tray order so they say nothing about the solution
        let pieces = ingredients
            .into_iter()
            .enumerate()
            .map(|(idx, ingredient)| Piece {
                id: idx as PieceId,
                ingredient,
                placed: false,
            })
            .collect();

        Self {
            pieces,
            slots: vec![None; recipe.slot_count()],
            active_categories,
        }
    }
}
