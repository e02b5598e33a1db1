//! Recipe Puzzle session host.
//!
//! Runs one local game. The presentation layer writes JSON messages to stdin
//! and reads replies and snapshots from stdout; logs go to stderr.

use recipe_core::GameState;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod console;
mod protocol;
mod session;

use config::Settings;
use session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stdout carries the protocol)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env()?;
    let catalog = settings.load_catalog().await?;
    info!(languages = ?catalog.languages(), "Catalog loaded");

    let game = GameState::new(settings.game, catalog)?;

    let (reply_tx, reply_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (session, snapshots) = Session::new(game, reply_tx.clone());

    let writer = tokio::spawn(console::write_output(reply_rx, snapshots));
    console::spawn_reader(command_tx, reply_tx)?;

    let game = session.run(command_rx).await;
    for player in &game.players {
        info!(player = %player.name, score = player.score, "Final score");
    }

    // Dropping the session closed the snapshot channel, which ends the writer
    writer.await??;
    Ok(())
}
