//! Core game state machine.
//!
//! This module contains the main `GameState` struct and all game logic.
//! Every handler validates an action completely before touching any field,
//! so a rejected action leaves the state exactly as it was.

use crate::actions::{GameAction, GameEvent};
use crate::config::{ConfigError, GameConfig};
use crate::hints::{HintManager, HintToken};
use crate::player::{roster, Player};
use crate::puzzle::{Difficulty, Piece, PieceId, Puzzle, Slot};
use crate::recipe::{Catalog, Recipe};
use crate::scoring::{self, HINT_PENALTY};
use crate::turn::{TickOutcome, TurnScheduler};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Why an action was turned away. None of these are fatal; the state is
/// unchanged after any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectedEvent {
    #[error("No piece is being dragged")]
    NoActiveDrag,

    #[error("No piece with id {0}")]
    UnknownPiece(PieceId),

    #[error("Piece {0} is already placed")]
    PieceAlreadyPlaced(PieceId),

    #[error("No slot at index {0}")]
    SlotOutOfRange(usize),

    #[error("Slot {0} is already filled")]
    SlotOccupied(usize),

    #[error("No hints remaining")]
    NoHintsRemaining,

    #[error("Hint timer belongs to a superseded hint")]
    StaleHintTimer,

    #[error("Turn timer is not running")]
    TimerNotRunning,

    #[error("Puzzle is already complete")]
    PuzzleComplete,

    #[error("No recipe for language '{0}'")]
    UnknownLanguage(String),

    #[error("Recipe cannot be played: {0}")]
    UnusableRecipe(String),
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Active language, difficulty and timings
    pub config: GameConfig,
    /// Recipes available for language switches
    pub catalog: Catalog,
    /// Recipe being solved
    pub recipe: Recipe,
    /// Tray, in shuffled order
    pub pieces: Vec<Piece>,
    /// One per recipe ingredient
    pub slots: Vec<Slot>,
    pub active_categories: BTreeSet<String>,
    pub players: Vec<Player>,
    /// Index into `players` of whoever's turn it is
    pub current_player: usize,
    pub turn: TurnScheduler,
    pub hints: HintManager,
    /// Piece currently held by the pointer
    pub dragging: Option<PieceId>,
    pub complete: bool,
    /// Bumped on every new puzzle; stale timers carry an older value
    pub generation: u64,
    /// Bumped on every accepted action
    pub version: u64,
}

impl GameState {
    /// Create a session from a configuration and a catalog
    pub fn new(config: GameConfig, catalog: Catalog) -> Result<Self, ConfigError> {
        config.validate()?;

        let recipe = catalog.recipe(&config.language)?.clone();
        recipe.validate()?;
        recipe.validate_hints(config.hint_uses)?;

        let puzzle = Puzzle::generate(&recipe, config.difficulty);

        Ok(Self {
            players: roster(&config.players),
            current_player: 0,
            turn: TurnScheduler::new(config.turn_seconds),
            hints: HintManager::new(config.hint_uses, config.hint_display_secs),
            pieces: puzzle.pieces,
            slots: puzzle.slots,
            active_categories: puzzle.active_categories,
            dragging: None,
            complete: false,
            generation: 1,
            version: 0,
            recipe,
            catalog,
            config,
        })
    }

    /// Default two-player carbonara game
    pub fn new_standard() -> Result<Self, ConfigError> {
        Self::new(GameConfig::default(), Catalog::builtin())
    }

    // ==================== Queries ====================

    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn remaining_time(&self) -> u32 {
        self.turn.remaining()
    }

    pub fn timer_running(&self) -> bool {
        self.turn.is_running()
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints.remaining()
    }

    pub fn hint_visible(&self) -> bool {
        self.hints.is_visible()
    }

    /// Text of the hint currently showing
    pub fn hint_text(&self) -> Option<&str> {
        self.hints
            .visible_index()
            .and_then(|idx| self.recipe.hints.get(idx))
            .map(String::as_str)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_by_name(&self, name: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.name() == name)
    }

    /// Pieces still in the tray
    pub fn unplaced_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| !p.placed)
    }

    /// `Some(correct)` for a filled slot, `None` for an empty or missing one
    pub fn slot_correctness(&self, slot_index: usize) -> Option<bool> {
        self.slots
            .get(slot_index)?
            .as_ref()
            .map(|piece| scoring::is_correct(&self.recipe, slot_index, piece))
    }

    // ==================== Actions ====================

    /// Apply an action to the game state
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, RejectedEvent> {
        let events = match action {
            GameAction::SelectDifficulty(difficulty) => self.reinitialize(Some(difficulty), None)?,
            GameAction::SelectLanguage(language) => self.reinitialize(None, Some(language))?,
            GameAction::PlayAgain => self.reinitialize(None, None)?,
            GameAction::DragStart(piece) => self.drag_start(piece)?,
            GameAction::Drop(slot) => self.drop_dragged(slot)?,
            GameAction::RequestHint => self.request_hint()?,
            GameAction::HideHint(token) => self.hide_hint(token)?,
            GameAction::Tick => self.tick()?,
        };

        self.version += 1;
        Ok(events)
    }

    /// Apply an action to a copy, leaving `self` untouched
    pub fn next(&self, action: GameAction) -> (GameState, Result<Vec<GameEvent>, RejectedEvent>) {
        let mut next = self.clone();
        let result = next.apply_action(action);
        (next, result)
    }

    /// Deal a new puzzle, optionally switching difficulty and/or recipe.
    ///
    /// Scores and turn order carry over. Timer, hints and completion reset,
    /// and the generation bump invalidates any pending hint timer.
    pub fn reinitialize(
        &mut self,
        difficulty: Option<Difficulty>,
        language: Option<String>,
    ) -> Result<Vec<GameEvent>, RejectedEvent> {
        let mut config = self.config.clone();
        if let Some(difficulty) = difficulty {
            config.difficulty = difficulty;
        }
        if let Some(language) = language {
            config.language = language;
        }

        let recipe = self
            .catalog
            .recipe(&config.language)
            .map_err(|_| RejectedEvent::UnknownLanguage(config.language.clone()))?
            .clone();
        recipe
            .validate()
            .and_then(|_| recipe.validate_hints(config.hint_uses))
            .map_err(|e| RejectedEvent::UnusableRecipe(e.to_string()))?;

        let puzzle = Puzzle::generate(&recipe, config.difficulty);

        self.config = config;
        self.recipe = recipe;
        self.pieces = puzzle.pieces;
        self.slots = puzzle.slots;
        self.active_categories = puzzle.active_categories;
        self.turn.reset();
        self.hints.reset();
        self.dragging = None;
        self.complete = false;
        self.generation += 1;

        Ok(vec![GameEvent::PuzzleStarted {
            generation: self.generation,
            recipe: self.recipe.name.clone(),
            difficulty: self.config.difficulty,
            pieces: self.pieces.len(),
            slots: self.slots.len(),
        }])
    }

    /// Pick up a piece; the first pickup of a turn starts the clock
    pub fn drag_start(&mut self, piece_id: PieceId) -> Result<Vec<GameEvent>, RejectedEvent> {
        if self.complete {
            return Err(RejectedEvent::PuzzleComplete);
        }
        self.unplaced(piece_id)?;

        let mut events = Vec::new();
        events.extend(self.start_timer());
        self.dragging = Some(piece_id);
        events.push(GameEvent::PieceLifted { piece: piece_id });

        Ok(events)
    }

    /// Drop whatever is held into `slot_index`
    pub fn drop_dragged(&mut self, slot_index: usize) -> Result<Vec<GameEvent>, RejectedEvent> {
        let piece_id = self.dragging.ok_or(RejectedEvent::NoActiveDrag)?;
        self.place_attempt(slot_index, piece_id)
    }

    /// Place a piece into a slot and score it for the active player.
    ///
    /// Wrong pieces stay where they land; only a new puzzle clears a slot.
    pub fn place_attempt(
        &mut self,
        slot_index: usize,
        piece_id: PieceId,
    ) -> Result<Vec<GameEvent>, RejectedEvent> {
        if self.complete {
            return Err(RejectedEvent::PuzzleComplete);
        }
        match self.slots.get(slot_index) {
            None => return Err(RejectedEvent::SlotOutOfRange(slot_index)),
            Some(Some(_)) => return Err(RejectedEvent::SlotOccupied(slot_index)),
            Some(None) => {}
        }
        let tray_index = self.unplaced(piece_id)?;

        let mut events = Vec::new();
        events.extend(self.start_timer());

        let remaining = self.turn.remaining();
        let piece = &mut self.pieces[tray_index];
        piece.placed = true;
        let delta = scoring::evaluate_placement(slot_index, piece, &self.recipe, remaining);
        self.slots[slot_index] = Some(piece.clone());

        if self.dragging == Some(piece_id) {
            self.dragging = None;
        }

        let player = &mut self.players[self.current_player];
        let score = player.apply(delta.total);
        events.push(GameEvent::PiecePlaced {
            player: player.id,
            piece: piece_id,
            slot: slot_index,
            delta,
            score,
        });

        events.extend(self.check_completion());
        Ok(events)
    }

    /// Spend a hint: costs the active player points and shows the next hint text
    pub fn request_hint(&mut self) -> Result<Vec<GameEvent>, RejectedEvent> {
        if self.complete {
            return Err(RejectedEvent::PuzzleComplete);
        }

        let reveal = self
            .hints
            .use_hint(self.generation)
            .ok_or(RejectedEvent::NoHintsRemaining)?;
        let text = self.recipe.hints.get(reveal.index).cloned().unwrap_or_default();

        let player = &mut self.players[self.current_player];
        let score = player.apply(HINT_PENALTY);

        Ok(vec![GameEvent::HintRevealed {
            player: player.id,
            text,
            token: reveal.token,
            hide_after_secs: reveal.hide_after_secs,
            hints_remaining: self.hints.remaining(),
            score,
        }])
    }

    /// Hide the visible hint if `token` is its pending timer
    pub fn hide_hint(&mut self, token: HintToken) -> Result<Vec<GameEvent>, RejectedEvent> {
        if self.hints.hide(token) {
            Ok(vec![GameEvent::HintHidden])
        } else {
            Err(RejectedEvent::StaleHintTimer)
        }
    }

    /// One second of real time. Rotates the turn when the clock runs out.
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, RejectedEvent> {
        match self.turn.tick() {
            None => Err(RejectedEvent::TimerNotRunning),
            Some(TickOutcome::Counted { remaining }) => Ok(vec![GameEvent::ClockTicked { remaining }]),
            Some(TickOutcome::Expired) => Ok(vec![self.switch_player()]),
        }
    }

    // ==================== Helper Methods ====================

    /// Tray index of an unplaced piece
    fn unplaced(&self, piece_id: PieceId) -> Result<usize, RejectedEvent> {
        let idx = self
            .pieces
            .iter()
            .position(|p| p.id == piece_id)
            .ok_or(RejectedEvent::UnknownPiece(piece_id))?;
        if self.pieces[idx].placed {
            return Err(RejectedEvent::PieceAlreadyPlaced(piece_id));
        }
        Ok(idx)
    }

    fn start_timer(&mut self) -> Option<GameEvent> {
        if self.turn.start() {
            Some(GameEvent::TimerStarted {
                player: self.current().id,
                remaining: self.turn.remaining(),
            })
        } else {
            None
        }
    }

    fn check_completion(&mut self) -> Option<GameEvent> {
        if !scoring::is_solved(&self.recipe, &self.slots) {
            return None;
        }

        let bonus = scoring::completion_bonus(self.turn.remaining());
        let player = &mut self.players[self.current_player];
        player.score = player.score.saturating_add(bonus);

        self.complete = true;
        self.turn.suspend();

        Some(GameEvent::PuzzleCompleted {
            player: player.id,
            bonus,
            score: player.score,
        })
    }

    /// Hand the turn to the next player. The held piece, if any, is dropped
    /// back into the tray.
    fn switch_player(&mut self) -> GameEvent {
        let player = self.current().id;

        self.current_player = (self.current_player + 1) % self.players.len();
        for (idx, p) in self.players.iter_mut().enumerate() {
            p.is_current_turn = idx == self.current_player;
        }
        self.dragging = None;

        GameEvent::TurnExpired {
            player,
            next_player: self.current().id,
            remaining: self.turn.remaining(),
        }
    }
}
