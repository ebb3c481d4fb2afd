use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::repository::{MovieRepository, StoreOp};

#[derive(Debug)]
pub enum WriteMessage {
    /// Persist a favorite toggle
    Apply(StoreOp),
    /// Acknowledge once every earlier message has been handled
    Flush(oneshot::Sender<()>),
    /// Stop the writer
    Shutdown,
}

/// Handle used to queue favorite writes without waiting for them.
#[derive(Clone)]
pub struct FavoriteWriterHandle {
    tx: mpsc::UnboundedSender<WriteMessage>,
}

impl FavoriteWriterHandle {
    /// Queue a store write. Returns immediately.
    pub fn submit(&self, op: StoreOp) {
        if let Err(e) = self.tx.send(WriteMessage::Apply(op)) {
            warn!("Favorite writer is gone, dropping write: {:?}", e.0);
        }
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(WriteMessage::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(WriteMessage::Shutdown);
    }
}

/// Applies favorite toggles to the store in the background.
///
/// Writes are fire-and-forget for the display list: a failed write is
/// logged and never rolled back into the list.
pub struct FavoriteWriter {
    repository: Arc<MovieRepository>,
    rx: mpsc::UnboundedReceiver<WriteMessage>,
}

impl FavoriteWriter {
    pub fn new(repository: Arc<MovieRepository>) -> (Self, FavoriteWriterHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = FavoriteWriterHandle { tx };
        let writer = Self { repository, rx };
        (writer, handle)
    }

    pub async fn run(mut self) {
        debug!("Favorite writer started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WriteMessage::Apply(op) => {
                    let movie_id = op.record().id;
                    match self.repository.apply(&op) {
                        Ok(()) => match op {
                            StoreOp::Upsert(_) => info!("Saved favorite {}", movie_id),
                            StoreOp::Delete(_) => info!("Removed favorite {}", movie_id),
                        },
                        Err(e) => error!("Failed to persist favorite {}: {}", movie_id, e),
                    }
                }
                WriteMessage::Flush(ack) => {
                    let _ = ack.send(());
                }
                WriteMessage::Shutdown => {
                    debug!("Favorite writer shutting down");
                    break;
                }
            }
        }
    }
}

/// Spawn the favorite writer as a tokio task
pub fn spawn_favorite_writer(repository: Arc<MovieRepository>) -> FavoriteWriterHandle {
    let (writer, handle) = FavoriteWriter::new(repository);

    tokio::spawn(async move {
        writer.run().await;
    });

    handle
}
