//! Recipe Puzzle - put a recipe's ingredients in order before the clock runs out
//!
//! This crate provides the game state engine, including:
//! - Recipes and the language-keyed catalog they come from
//! - Puzzle generation with optional decoy pieces
//! - Scoring for placements, completion and hints
//! - The per-turn countdown and turn rotation
//! - The game state machine tying it all together
//!
//! # Architecture
//!
//! The engine does no I/O and owns no clocks. Real time enters as
//! [`GameAction::Tick`] and [`GameAction::HideHint`] actions sent by the
//! host, so the engine can be driven from a tokio loop, a browser (through
//! the `wasm` feature) or a test.
//!
//! # Modules
//!
//! - [`recipe`]: Recipes, ingredients and the catalog
//! - [`puzzle`]: Difficulty, pieces, slots and generation
//! - [`scoring`]: Point deltas and the completion rule
//! - [`hints`]: Hint budget and hide timers
//! - [`turn`]: Turn countdown
//! - [`game`]: Game state machine
//! - [`snapshot`]: Read-only view for rendering

pub mod actions;
pub mod config;
pub mod game;
pub mod hints;
pub mod player;
pub mod puzzle;
pub mod recipe;
pub mod scoring;
pub mod snapshot;
pub mod turn;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use config::{ConfigError, GameConfig};
pub use game::{GameState, RejectedEvent};
pub use hints::{HintManager, HintReveal, HintToken};
pub use player::{Player, PlayerId};
pub use puzzle::{Difficulty, Piece, PieceId, Puzzle, Slot};
pub use recipe::{Catalog, CatalogError, Ingredient, Recipe};
pub use scoring::ScoreDelta;
pub use snapshot::{GameSnapshot, SlotView};
pub use turn::{TickOutcome, TurnPhase, TurnScheduler};
