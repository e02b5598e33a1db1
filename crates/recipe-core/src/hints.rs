//! Hint budget and hint visibility.
//!
//! Each revealed hint stays on screen for a fixed real-time delay. The delay
//! itself runs outside the engine: revealing a hint hands out a
//! [`HintToken`], and the host feeds the token back once the delay elapses.
//! Only the token of the most recent reveal in the current puzzle generation
//! hides the hint, so a superseded or stale timer is ignored.

use serde::{Deserialize, Serialize};

/// Hint uses granted per puzzle
pub const DEFAULT_HINT_USES: u8 = 3;

/// Seconds a hint stays visible
pub const DEFAULT_HINT_DISPLAY_SECS: u64 = 5;

/// Identifies one scheduled hint-hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintToken {
    /// Puzzle generation the hint was revealed in
    pub generation: u64,
    /// Reveal sequence number within that generation
    pub seq: u32,
}

/// A hint that was just revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintReveal {
    /// Index into the recipe's hint list
    pub index: usize,
    pub token: HintToken,
    pub hide_after_secs: u64,
}

/// Tracks remaining hints and which one is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintManager {
    uses: u8,
    remaining: u8,
    display_secs: u64,
    /// Pending hide for the visible hint
    visible: Option<HintReveal>,
    seq: u32,
}

impl HintManager {
    pub fn new(uses: u8, display_secs: u64) -> Self {
        Self {
            uses,
            remaining: uses,
            display_secs,
            visible: None,
            seq: 0,
        }
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn is_visible(&self) -> bool {
        self.visible.is_some()
    }

    /// Hint index currently showing
    pub fn visible_index(&self) -> Option<usize> {
        self.visible.map(|reveal| reveal.index)
    }

    /// Token of the pending hide, if a hint is showing
    pub fn pending_token(&self) -> Option<HintToken> {
        self.visible.map(|reveal| reveal.token)
    }

    /// Consume a hint. Returns `None` when none are left.
    ///
    /// Hints are revealed in list order: the first use shows hint 0. A new
    /// reveal replaces the pending hide of the previous one.
    pub fn use_hint(&mut self, generation: u64) -> Option<HintReveal> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        self.seq += 1;

        let reveal = HintReveal {
            index: (self.uses - self.remaining - 1) as usize,
            token: HintToken {
                generation,
                seq: self.seq,
            },
            hide_after_secs: self.display_secs,
        };
        self.visible = Some(reveal);
        Some(reveal)
    }

    /// Hide the hint if `token` is the pending one. Returns whether it matched.
    pub fn hide(&mut self, token: HintToken) -> bool {
        if self.pending_token() == Some(token) {
            self.visible = None;
            true
        } else {
            false
        }
    }

    /// Restore the full budget and drop any pending hide
    pub fn reset(&mut self) {
        self.remaining = self.uses;
        self.visible = None;
        self.seq = 0;
    }
}

impl Default for HintManager {
    fn default() -> Self {
        Self::new(DEFAULT_HINT_USES, DEFAULT_HINT_DISPLAY_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_uses_then_none() {
        let mut hints = HintManager::default();

        let indices: Vec<usize> = (0..3).map(|_| hints.use_hint(1).unwrap().index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(hints.remaining(), 0);

        assert!(hints.use_hint(1).is_none());
        assert_eq!(hints.remaining(), 0);
    }

    #[test]
    fn test_index_matches_two_minus_remaining() {
        let mut hints = HintManager::default();
        while let Some(reveal) = hints.use_hint(1) {
            assert_eq!(reveal.index, 2 - hints.remaining() as usize);
        }
    }

    #[test]
    fn test_newer_hint_supersedes_hide() {
        let mut hints = HintManager::default();
        let first = hints.use_hint(1).unwrap();
        let second = hints.use_hint(1).unwrap();

        // The first timer fires late; the second hint stays up
        assert!(!hints.hide(first.token));
        assert!(hints.is_visible());
        assert_eq!(hints.visible_index(), Some(1));

        assert!(hints.hide(second.token));
        assert!(!hints.is_visible());
    }

    #[test]
    fn test_reset_discards_pending_hide() {
        let mut hints = HintManager::default();
        let reveal = hints.use_hint(1).unwrap();
        hints.reset();

        assert_eq!(hints.remaining(), DEFAULT_HINT_USES);
        assert!(!hints.is_visible());

        // Same sequence number, newer generation
        let fresh = hints.use_hint(2).unwrap();
        assert_eq!(fresh.token.seq, reveal.token.seq);
        assert!(!hints.hide(reveal.token));
        assert!(hints.is_visible());
    }
}
