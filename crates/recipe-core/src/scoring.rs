//! Scoring rules.
//!
//! - Correct placement: the ingredient's points plus `remaining / 10`
//! - Incorrect placement: a flat penalty
//! - Completion: a fixed bonus plus `remaining / 2`
//! - Hints: a flat penalty
//!
//! Deltas are signed. Clamping to zero happens when a delta is applied to a
//! score, never on the delta itself.

use crate::puzzle::{Piece, Slot};
use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};

/// Penalty for dropping a piece into the wrong slot
pub const WRONG_PLACEMENT_PENALTY: i32 = -5;

/// Penalty for revealing a hint
pub const HINT_PENALTY: i32 = -10;

/// Flat part of the completion bonus
pub const COMPLETION_BASE: u32 = 100;

/// Result of scoring one placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub correct: bool,
    /// Ingredient points for a correct drop, the penalty otherwise
    pub base: i32,
    pub time_bonus: i32,
    pub total: i32,
}

/// Whether `piece` belongs in slot `slot_index`. Compares names, so decoys never match.
pub fn is_correct(recipe: &Recipe, slot_index: usize, piece: &Piece) -> bool {
    recipe
        .ingredients
        .get(slot_index)
        .is_some_and(|ingredient| ingredient.name == piece.ingredient.name)
}

/// Score a drop of `piece` into `slot_index` with `remaining_time` seconds on the clock
pub fn evaluate_placement(
    slot_index: usize,
    piece: &Piece,
    recipe: &Recipe,
    remaining_time: u32,
) -> ScoreDelta {
    if is_correct(recipe, slot_index, piece) {
        let base = piece.points();
        let time_bonus = (remaining_time / 10) as i32;
        ScoreDelta {
            correct: true,
            base,
            time_bonus,
            total: base.saturating_add(time_bonus),
        }
    } else {
        ScoreDelta {
            correct: false,
            base: WRONG_PLACEMENT_PENALTY,
            time_bonus: 0,
            total: WRONG_PLACEMENT_PENALTY,
        }
    }
}

/// Every slot is filled and every occupant is the right ingredient
pub fn is_solved(recipe: &Recipe, slots: &[Slot]) -> bool {
    slots.len() == recipe.slot_count()
        && slots.iter().enumerate().all(|(idx, slot)| {
            slot.as_ref()
                .is_some_and(|piece| is_correct(recipe, idx, piece))
        })
}

/// Bonus for finishing the puzzle
pub fn completion_bonus(remaining_time: u32) -> u32 {
    COMPLETION_BASE + remaining_time / 2
}

/// Apply a signed delta to a score, never going below zero
pub fn apply_delta(score: u32, delta: i32) -> u32 {
    if delta >= 0 {
        score.saturating_add(delta as u32)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    }
}
