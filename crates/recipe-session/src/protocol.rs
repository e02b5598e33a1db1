//! JSON-lines protocol between the presentation layer and the session.

use recipe_core::{Difficulty, GameAction, GameEvent, GameSnapshot, PieceId, RejectedEvent};
use serde::{Deserialize, Serialize};

/// Messages sent from the presentation layer to the session.
///
/// Clock ticks and hint expiry are not here; the session generates those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Change difficulty (starts a new puzzle)
    SelectDifficulty { level: Difficulty },

    /// Change recipe language (starts a new puzzle)
    SelectLanguage { code: String },

    /// Pick up a piece
    DragStart { piece_id: PieceId },

    /// Drop the held piece into a slot
    Drop { slot_index: usize },

    /// Spend a hint
    RequestHint,

    /// New puzzle, same settings
    PlayAgain,

    /// Ask for the current snapshot
    Snapshot,

    /// End the session
    Quit,
}

impl ClientMessage {
    /// The engine action this message maps to, if any
    pub fn to_action(&self) -> Option<GameAction> {
        match self {
            ClientMessage::SelectDifficulty { level } => Some(GameAction::SelectDifficulty(*level)),
            ClientMessage::SelectLanguage { code } => Some(GameAction::SelectLanguage(code.clone())),
            ClientMessage::DragStart { piece_id } => Some(GameAction::DragStart(*piece_id)),
            ClientMessage::Drop { slot_index } => Some(GameAction::Drop(*slot_index)),
            ClientMessage::RequestHint => Some(GameAction::RequestHint),
            ClientMessage::PlayAgain => Some(GameAction::PlayAgain),
            ClientMessage::Snapshot | ClientMessage::Quit => None,
        }
    }
}

/// Messages sent from the session to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Full state after an event
    Snapshot { state: Box<GameSnapshot> },

    /// Outcome of a client message
    ActionResult {
        success: bool,
        events: Vec<GameEvent>,
        rejected: Option<RejectedEvent>,
    },

    /// Unparseable input
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_messages() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"DragStart","payload":{"piece_id":3}}"#).unwrap();
        assert_eq!(msg, ClientMessage::DragStart { piece_id: 3 });
        assert_eq!(msg.to_action(), Some(GameAction::DragStart(3)));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"SelectDifficulty","payload":{"level":"hard"}}"#)
                .unwrap();
        assert_eq!(msg.to_action(), Some(GameAction::SelectDifficulty(Difficulty::Hard)));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"RequestHint"}"#).unwrap();
        assert_eq!(msg.to_action(), Some(GameAction::RequestHint));
    }

    #[test]
    fn test_session_messages_have_no_action() {
        assert_eq!(ClientMessage::Snapshot.to_action(), None);
        assert_eq!(ClientMessage::Quit.to_action(), None);
    }

    #[test]
    fn test_rejection_serializes() {
        let msg = ServerMessage::ActionResult {
            success: false,
            events: vec![],
            rejected: Some(RejectedEvent::SlotOccupied(2)),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "ActionResult");
        assert_eq!(json["payload"]["rejected"]["SlotOccupied"], 2);
    }
}
