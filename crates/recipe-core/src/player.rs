//! Player state.

use crate::scoring::apply_delta;
use serde::{Deserialize, Serialize};

/// Player identifier (1-based, display order)
pub type PlayerId = u8;

/// Most players a session can seat
pub const MAX_PLAYERS: usize = 4;

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Cumulative score, kept across puzzles
    pub score: u32,
    pub is_current_turn: bool,
}

impl Player {
    /// Create a new player
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            score: 0,
            is_current_turn: false,
        }
    }

    /// Apply a signed delta, clamping at zero. Returns the new score.
    pub fn apply(&mut self, delta: i32) -> u32 {
        self.score = apply_delta(self.score, delta);
        self.score
    }
}

/// Seat players in order; the first one starts
pub fn roster(names: &[String]) -> Vec<Player> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mut player = Player::new(idx as PlayerId + 1, name.clone());
            player.is_current_turn = idx == 0;
            player
        })
        .collect()
}

/// Players ordered by score, highest first; ties keep seating order
pub fn standings(players: &[Player]) -> Vec<Player> {
    let mut ranked = players.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster() {
        let players = roster(&["Player 1".to_string(), "Player 2".to_string()]);
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, 1);
        assert_eq!(players[1].id, 2);
        assert!(players[0].is_current_turn);
        assert!(!players[1].is_current_turn);
        assert!(players.iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_apply_clamps() {
        let mut player = Player::new(1, "Test".to_string());
        assert_eq!(player.apply(-5), 0);
        assert_eq!(player.apply(40), 40);
        assert_eq!(player.apply(-10), 30);
    }

    #[test]
    fn test_standings() {
        let mut players = roster(&["A".to_string(), "B".to_string(), "C".to_string()]);
        players[1].score = 50;
        players[2].score = 50;
        players[0].score = 10;

        let ranked = standings(&players);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
