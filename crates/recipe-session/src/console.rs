//! stdin/stdout transport: one JSON message per line.

use crate::protocol::{ClientMessage, ServerMessage};
use recipe_core::GameSnapshot;
use std::io::BufRead;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

/// Forward parsed stdin lines to the session until EOF.
///
/// Runs on a plain thread: a blocking stdin read must not keep the runtime
/// from shutting down once the session has ended.
pub fn spawn_reader(
    commands: mpsc::UnboundedSender<ClientMessage>,
    replies: mpsc::UnboundedSender<ServerMessage>,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match serde_json::from_str::<ClientMessage>(line) {
                    Ok(msg) => {
                        if commands.send(msg).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Invalid message: {}", e);
                        let _ = replies.send(ServerMessage::Error {
                            message: e.to_string(),
                        });
                    }
                }
            }
            info!("Input closed");
        })
}

/// Write replies and every new snapshot to stdout until the session is gone
pub async fn write_output(
    mut replies: mpsc::UnboundedReceiver<ServerMessage>,
    mut snapshots: watch::Receiver<GameSnapshot>,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    let initial = Box::new(snapshots.borrow_and_update().clone());
    write_line(&mut stdout, &ServerMessage::Snapshot { state: initial }).await?;

    loop {
        tokio::select! {
            msg = replies.recv() => match msg {
                Some(msg) => write_line(&mut stdout, &msg).await?,
                None => break,
            },

            changed = snapshots.changed() => {
                if changed.is_err() {
                    // Session is over; flush what it already said
                    while let Ok(msg) = replies.try_recv() {
                        write_line(&mut stdout, &msg).await?;
                    }
                    break;
                }
                let state = Box::new(snapshots.borrow_and_update().clone());
                write_line(&mut stdout, &ServerMessage::Snapshot { state }).await?;
            }
        }
    }

    Ok(())
}

async fn write_line<W>(out: &mut W, msg: &ServerMessage) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    out.flush().await?;
    Ok(())
}
