//! Turn countdown.
//!
//! One countdown exists per game, owned by whoever's turn it is. It starts on
//! the first drag of a turn, loses a second per tick, and on reaching zero
//! hands the turn on and starts over for the next player without going idle.

use serde::{Deserialize, Serialize};

/// Seconds on the clock at the start of each turn
pub const DEFAULT_TURN_SECONDS: u32 = 300;

/// Countdown state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the first drag of the turn
    #[default]
    Idle,
    /// Counting down
    Active,
    /// Frozen after the puzzle was completed
    Suspended,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// One second gone
    Counted { remaining: u32 },
    /// Clock hit zero; the countdown has been refilled for the next turn
    Expired,
}

/// The per-turn countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScheduler {
    phase: TurnPhase,
    remaining: u32,
    turn_seconds: u32,
}

impl TurnScheduler {
    pub fn new(turn_seconds: u32) -> Self {
        Self {
            phase: TurnPhase::Idle,
            remaining: turn_seconds,
            turn_seconds,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.phase == TurnPhase::Active
    }

    /// Idle -> Active. Returns whether the countdown started.
    pub fn start(&mut self) -> bool {
        if self.phase == TurnPhase::Idle {
            self.phase = TurnPhase::Active;
            true
        } else {
            false
        }
    }

    /// Advance one second. `None` unless the countdown is running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.phase != TurnPhase::Active {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            // Expired is transient: refill and keep running for the next player
            self.remaining = self.turn_seconds;
            Some(TickOutcome::Expired)
        } else {
            Some(TickOutcome::Counted {
                remaining: self.remaining,
            })
        }
    }

    /// Freeze the countdown until the next reset
    pub fn suspend(&mut self) {
        self.phase = TurnPhase::Suspended;
    }

    /// Back to Idle with a full clock
    pub fn reset(&mut self) {
        self.phase = TurnPhase::Idle;
        self.remaining = self.turn_seconds;
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TURN_SECONDS)
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
