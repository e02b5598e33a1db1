//! Read-only view of a game for the presentation layer.
//!
//! A snapshot is taken after every event and carries everything needed to
//! draw the board: the tray, per-slot correctness for styling, the clock as
//! text, the visible hint, and final standings once the puzzle is done.

use crate::game::GameState;
use crate::player::{standings, Player};
use crate::puzzle::{Difficulty, Piece, PieceId};
use crate::turn::{format_clock, TurnPhase};
use serde::{Deserialize, Serialize};

/// One slot as the board shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    pub occupant: Option<Piece>,
    /// `None` while empty
    pub correct: Option<bool>,
}

/// Everything the presentation layer reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub generation: u64,
    pub version: u64,
    pub language: String,
    pub recipe_name: String,
    pub difficulty: Difficulty,
    /// Unplaced pieces, shuffled order
    pub tray: Vec<Piece>,
    pub slots: Vec<SlotView>,
    pub categories: Vec<String>,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub remaining_time: u32,
    /// `m:ss`
    pub clock: String,
    pub timer_running: bool,
    pub turn_phase: TurnPhase,
    pub hints_remaining: u8,
    /// Present only while a hint is visible
    pub hint: Option<String>,
    pub dragging: Option<PieceId>,
    pub complete: bool,
    /// Players by score, only once complete
    pub standings: Option<Vec<Player>>,
}

impl GameSnapshot {
    pub fn capture(game: &GameState) -> Self {
        Self {
            generation: game.generation,
            version: game.version,
            language: game.config.language.clone(),
            recipe_name: game.recipe.name.clone(),
            difficulty: game.difficulty(),
            tray: game.unplaced_pieces().cloned().collect(),
            slots: game
                .slots
                .iter()
                .enumerate()
                .map(|(index, slot)| SlotView {
                    index,
                    occupant: slot.clone(),
                    correct: game.slot_correctness(index),
                })
                .collect(),
            categories: game.active_categories.iter().cloned().collect(),
            players: game.players.clone(),
            current_player_index: game.current_player,
            remaining_time: game.remaining_time(),
            clock: format_clock(game.remaining_time()),
            timer_running: game.timer_running(),
            turn_phase: game.turn.phase(),
            hints_remaining: game.hints_remaining(),
            hint: game.hint_text().map(str::to_string),
            dragging: game.dragging,
            complete: game.complete,
            standings: game.complete.then(|| standings(&game.players)),
        }
    }
}

impl GameState {
    /// Capture a snapshot of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}
