//! Events the presentation layer sends in and events the engine reports back.

use crate::hints::HintToken;
use crate::player::PlayerId;
use crate::puzzle::{Difficulty, PieceId};
use crate::scoring::ScoreDelta;
use serde::{Deserialize, Serialize};

/// All inputs the engine accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Setup ====================
    /// Switch difficulty and start a new puzzle
    SelectDifficulty(Difficulty),
    /// Switch to another catalog recipe and start a new puzzle
    SelectLanguage(String),
    /// Start over with the same recipe and difficulty
    PlayAgain,

    // ==================== Placement ====================
    /// Pick up an unplaced piece
    DragStart(PieceId),
    /// Drop the held piece into a slot
    Drop(usize),

    // ==================== Hints ====================
    /// Spend a hint
    RequestHint,
    /// A hint's display delay elapsed
    HideHint(HintToken),

    // ==================== Clock ====================
    /// One second of real time passed
    Tick,
}

/// Things that happened as a result of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new puzzle was dealt
    PuzzleStarted {
        generation: u64,
        recipe: String,
        difficulty: Difficulty,
        pieces: usize,
        slots: usize,
    },

    /// The turn countdown started running
    TimerStarted { player: PlayerId, remaining: u32 },

    /// A piece was picked up
    PieceLifted { piece: PieceId },

    /// A piece was dropped into an empty slot
    PiecePlaced {
        player: PlayerId,
        piece: PieceId,
        slot: usize,
        delta: ScoreDelta,
        score: u32,
    },

    /// The last slot was filled correctly
    PuzzleCompleted {
        player: PlayerId,
        bonus: u32,
        score: u32,
    },

    /// A hint was revealed
    HintRevealed {
        player: PlayerId,
        text: String,
        token: HintToken,
        hide_after_secs: u64,
        hints_remaining: u8,
        score: u32,
    },

    /// The visible hint was hidden
    HintHidden,

    /// The countdown lost a second
    ClockTicked { remaining: u32 },

    /// The clock ran out and the turn moved on
    TurnExpired {
        player: PlayerId,
        next_player: PlayerId,
        remaining: u32,
    },
}
