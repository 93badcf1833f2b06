//! In-memory storage, keeping each board as its JSON record.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::scene::Scene;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and ephemeral sessions.
///
/// Boards are held serialized so a load never shares state with the saver.
#[derive(Default)]
pub struct MemoryStorage {
    boards: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(err: impl std::fmt::Display) -> StorageError {
        StorageError::Other(format!("Lock error: {}", err))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, board_id: &str, scene: &Scene) -> BoxFuture<'_, StorageResult<()>> {
        let board_id = board_id.to_string();
        let record = scene
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()));
        Box::pin(async move {
            let record = record?;
            self.boards
                .write()
                .map_err(Self::lock_error)?
                .insert(board_id, record);
            Ok(())
        })
    }

    fn load(&self, board_id: &str) -> BoxFuture<'_, StorageResult<Scene>> {
        let board_id = board_id.to_string();
        Box::pin(async move {
            let boards = self.boards.read().map_err(Self::lock_error)?;
            let record = boards
                .get(&board_id)
                .ok_or_else(|| StorageError::NotFound(board_id.clone()))?;
            Scene::from_json(record).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn delete(&self, board_id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let board_id = board_id.to_string();
        Box::pin(async move {
            self.boards
                .write()
                .map_err(Self::lock_error)?
                .remove(&board_id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let boards = self.boards.read().map_err(Self::lock_error)?;
            let mut ids: Vec<String> = boards.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, board_id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let board_id = board_id.to_string();
        Box::pin(async move {
            let boards = self.boards.read().map_err(Self::lock_error)?;
            Ok(boards.contains_key(&board_id))
        })
    }
}
