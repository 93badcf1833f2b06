//! Persistence seam: boards are stored as scenes keyed by board id.

mod memory;

pub use memory::MemoryStorage;

use crate::board::Board;
use crate::config::BoardConfig;
use crate::presence::ActorId;
use crate::scene::Scene;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future so backends can be used behind `dyn Storage`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A place boards are persisted to. The core never awaits these on the
/// editing path; hosts load before a session and save whenever they like.
pub trait Storage: Send + Sync {
    fn save(&self, board_id: &str, scene: &Scene) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, board_id: &str) -> BoxFuture<'_, StorageResult<Scene>>;

    fn delete(&self, board_id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Ids of every stored board.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, board_id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Start a session on a stored board, or on an empty one if it was never saved.
pub async fn open_board(
    storage: &dyn Storage,
    board_id: &str,
    local_actor: ActorId,
    config: BoardConfig,
) -> StorageResult<Board> {
    let mut board = Board::new(local_actor, config);
    match storage.load(board_id).await {
        Ok(scene) => board
            .load_scene(scene)
            .map_err(|e| StorageError::Serialization(e.to_string()))?,
        Err(StorageError::NotFound(_)) => {
            log::info!("Board {} not stored yet, starting empty", board_id);
        }
        Err(err) => return Err(err),
    }
    Ok(board)
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    use std::task::{Context, Poll, Waker};

    let mut cx = Context::from_waker(Waker::noop());
    let mut future = std::pin::pin!(future);
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
}
