//! The dispatch loop.
//!
//! One task owns the [`GameState`] and is its only writer. Client messages,
//! the one-second turn ticker and the hint-hide timer all funnel into it, and
//! each is applied completely before the next is looked at. After every
//! accepted action the new snapshot is published on a watch channel for any
//! number of readers.

use crate::protocol::{ClientMessage, ServerMessage};
use recipe_core::{GameAction, GameEvent, GameSnapshot, GameState, HintToken, RejectedEvent};
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, info, warn};

/// The pending hint-hide: which hint it hides and when
type HintTimer = Option<(HintToken, Pin<Box<Sleep>>)>;

/// A running game session
pub struct Session {
    game: GameState,
    ticker: Interval,
    hint_timer: HintTimer,
    snapshots: watch::Sender<GameSnapshot>,
    replies: mpsc::UnboundedSender<ServerMessage>,
}

impl Session {
    /// Wrap a game. Returns the session and a receiver for its snapshots.
    pub fn new(
        game: GameState,
        replies: mpsc::UnboundedSender<ServerMessage>,
    ) -> (Self, watch::Receiver<GameSnapshot>) {
        let (snapshots, snapshot_rx) = watch::channel(game.snapshot());

        let mut ticker = time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let session = Self {
            game,
            ticker,
            hint_timer: None,
            snapshots,
            replies,
        };
        (session, snapshot_rx)
    }

    /// Run until `Quit` or until every command sender is gone. Returns the final state.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<ClientMessage>) -> GameState {
        info!(
            recipe = %self.game.recipe.name,
            difficulty = ?self.game.difficulty(),
            players = self.game.players.len(),
            "Session started"
        );

        loop {
            tokio::select! {
                msg = commands.recv() => match msg {
                    None | Some(ClientMessage::Quit) => break,
                    Some(msg) => self.handle_message(msg),
                },

                _ = self.ticker.tick(), if self.game.timer_running() => {
                    let _ = self.dispatch(GameAction::Tick);
                }

                token = wait_for_hint(&mut self.hint_timer) => {
                    self.hint_timer = None;
                    let _ = self.dispatch(GameAction::HideHint(token));
                }
            }
        }

        info!(version = self.game.version, "Session ended");
        self.game
    }

    fn handle_message(&mut self, msg: ClientMessage) {
        let Some(action) = msg.to_action() else {
            let state = Box::new(self.game.snapshot());
            let _ = self.replies.send(ServerMessage::Snapshot { state });
            return;
        };

        let reply = match self.dispatch(action) {
            Ok(events) => ServerMessage::ActionResult {
                success: true,
                events,
                rejected: None,
            },
            Err(rejected) => ServerMessage::ActionResult {
                success: false,
                events: Vec::new(),
                rejected: Some(rejected),
            },
        };
        let _ = self.replies.send(reply);
    }

    /// Apply one action, rearm timers from its events and publish the result
    fn dispatch(&mut self, action: GameAction) -> Result<Vec<GameEvent>, RejectedEvent> {
        let events = match self.game.apply_action(action.clone()) {
            Ok(events) => events,
            Err(rejected) => {
                debug!(?action, %rejected, "Action rejected");
                return Err(rejected);
            }
        };

        for event in &events {
            self.observe(event);
        }
        self.snapshots.send_replace(self.game.snapshot());

        Ok(events)
    }

    fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PuzzleStarted {
                generation,
                recipe,
                difficulty,
                ..
            } => {
                // New puzzle: any pending hint-hide belongs to the old one
                self.hint_timer = None;
                info!(generation, %recipe, ?difficulty, "Puzzle dealt");
            }
            GameEvent::TimerStarted { player, remaining } => {
                self.ticker.reset();
                info!(player, remaining, "Turn timer started");
            }
            GameEvent::PiecePlaced {
                player,
                slot,
                delta,
                score,
                ..
            } => {
                info!(player, slot, correct = delta.correct, points = delta.total, score, "Piece placed");
            }
            GameEvent::PuzzleCompleted { player, bonus, score } => {
                info!(player, bonus, score, "Puzzle complete");
            }
            GameEvent::HintRevealed {
                player,
                token,
                hide_after_secs,
                hints_remaining,
                ..
            } => {
                let sleep = time::sleep(Duration::from_secs(*hide_after_secs));
                self.hint_timer = Some((*token, Box::pin(sleep)));
                info!(player, hints_remaining, "Hint revealed");
            }
            GameEvent::TurnExpired {
                player,
                next_player,
                ..
            } => {
                warn!(player, next_player, "Turn expired");
            }
            GameEvent::HintHidden | GameEvent::PieceLifted { .. } | GameEvent::ClockTicked { .. } => {
                debug!(?event, "Event");
            }
        }
    }
}

/// Resolves with the token once the pending hint-hide fires; never resolves if none is pending
async fn wait_for_hint(timer: &mut HintTimer) -> HintToken {
    match timer {
        Some((token, sleep)) => {
            sleep.as_mut().await;
            *token
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::TurnPhase;

    struct Harness {
        commands: mpsc::UnboundedSender<ClientMessage>,
        replies: mpsc::UnboundedReceiver<ServerMessage>,
        snapshots: watch::Receiver<GameSnapshot>,
        handle: tokio::task::JoinHandle<GameState>,
    }

    fn start() -> Harness {
        let game = GameState::new_standard().unwrap();
        let (reply_tx, replies) = mpsc::unbounded_channel();
        let (session, snapshots) = Session::new(game, reply_tx);
        let (commands, command_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(session.run(command_rx));
        Harness {
            commands,
            replies,
            snapshots,
            handle,
        }
    }

    impl Harness {
        fn send(&self, msg: ClientMessage) {
            self.commands.send(msg).unwrap();
        }

        fn snapshot(&self) -> GameSnapshot {
            self.snapshots.borrow().clone()
        }

        async fn reply(&mut self) -> ServerMessage {
            self.replies.recv().await.unwrap()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_runs_after_first_drag() {
        let mut h = start();
        let piece_id = h.snapshot().tray[0].id;

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(h.snapshot().remaining_time, 300);

        h.send(ClientMessage::DragStart { piece_id });
        assert!(matches!(h.reply().await, ServerMessage::ActionResult { success: true, .. }));

        time::sleep(Duration::from_millis(3500)).await;
        let snap = h.snapshot();
        assert_eq!(snap.turn_phase, TurnPhase::Active);
        assert_eq!(snap.remaining_time, 297);
        assert_eq!(snap.clock, "4:57");

        h.send(ClientMessage::Quit);
        let game = h.handle.await.unwrap();
        assert_eq!(game.remaining_time(), 297);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_hides_after_delay() {
        let mut h = start();

        h.send(ClientMessage::RequestHint);
        h.reply().await;
        assert!(h.snapshot().hint.is_some());

        time::sleep(Duration::from_millis(4500)).await;
        assert!(h.snapshot().hint.is_some());

        time::sleep(Duration::from_millis(1000)).await;
        assert!(h.snapshot().hint.is_none());
        assert_eq!(h.snapshot().hints_remaining, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_hint_supersedes_hide() {
        let mut h = start();

        h.send(ClientMessage::RequestHint);
        h.reply().await;
        time::sleep(Duration::from_secs(3)).await;

        h.send(ClientMessage::RequestHint);
        h.reply().await;

        // First hide would have fired at 5s
        time::sleep(Duration::from_secs(3)).await;
        let snap = h.snapshot();
        assert_eq!(snap.hint.as_deref(), Some("You'll need a hard Italian cheese"));

        time::sleep(Duration::from_millis(2500)).await;
        assert!(h.snapshot().hint.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_cancels_timers() {
        let mut h = start();
        let piece_id = h.snapshot().tray[0].id;

        h.send(ClientMessage::DragStart { piece_id });
        h.reply().await;
        h.send(ClientMessage::RequestHint);
        h.reply().await;

        h.send(ClientMessage::PlayAgain);
        h.reply().await;

        time::sleep(Duration::from_secs(10)).await;
        let snap = h.snapshot();
        assert_eq!(snap.turn_phase, TurnPhase::Idle);
        assert_eq!(snap.remaining_time, 300);
        assert!(snap.hint.is_none());
        assert_eq!(snap.hints_remaining, 3);
        assert_eq!(snap.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_is_reported() {
        let mut h = start();
        let before = h.snapshot();

        h.send(ClientMessage::Drop { slot_index: 0 });
        match h.reply().await {
            ServerMessage::ActionResult { success, rejected, .. } => {
                assert!(!success);
                assert_eq!(rejected, Some(RejectedEvent::NoActiveDrag));
            }
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(h.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_request() {
        let mut h = start();
        h.send(ClientMessage::Snapshot);
        match h.reply().await {
            ServerMessage::Snapshot { state } => assert_eq!(state.recipe_name, "Spaghetti Carbonara"),
            other => panic!("unexpected reply {:?}", other),
        }
    }
}
