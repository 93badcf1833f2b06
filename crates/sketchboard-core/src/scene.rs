//! Scene graph and the store that owns it.

use crate::history::{History, MAX_HISTORY};
use crate::layers::{Layer, LayerId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Maximum number of layers a board holds.
pub const MAX_LAYERS: usize = 100;

/// Scene store errors. All of them indicate a caller bug.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("index {index} out of range for z-order of length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("layer {0} already exists")]
    DuplicateLayer(LayerId),

    #[error("z-order and layer map disagree")]
    InconsistentScene,

    #[error("scene serialization: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layers keyed by id plus their back-to-front draw order.
///
/// `order` is always a permutation of the keys of `layers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    layers: HashMap<LayerId, Layer>,
    order: Vec<LayerId>,
}

impl Scene {
    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Layer ids, back to front.
    pub fn order(&self) -> &[LayerId] {
        &self.order
    }

    pub fn layers(&self) -> &HashMap<LayerId, Layer> {
        &self.layers
    }

    /// Layers in z-order (back to front).
    pub fn layers_ordered(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
        self.order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|layer| (id, layer)))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|other| other == id)
    }

    /// Check that the z-order and the map hold exactly the same ids.
    pub fn is_consistent(&self) -> bool {
        if self.order.len() != self.layers.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.order.len());
        self.order
            .iter()
            .all(|id| self.layers.contains_key(id) && seen.insert(id))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a scene, rejecting one whose z-order disagrees with its layers.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: Scene = serde_json::from_str(json)?;
        if !scene.is_consistent() {
            return Err(SceneError::InconsistentScene);
        }
        Ok(scene)
    }

    pub(crate) fn push(&mut self, id: LayerId, layer: Layer) {
        self.order.push(id.clone());
        self.layers.insert(id, layer);
    }

    pub(crate) fn replace(&mut self, id: &str, layer: Layer) -> bool {
        match self.layers.get_mut(id) {
            Some(slot) => {
                *slot = layer;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Layer> {
        let layer = self.layers.remove(id)?;
        self.order.retain(|other| other != id);
        Some(layer)
    }

    pub(crate) fn relocate(&mut self, from: usize, to: usize) -> Result<(), SceneError> {
        let len = self.order.len();
        for index in [from, to] {
            if index >= len {
                return Err(SceneError::InvalidIndex { index, len });
            }
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        Ok(())
    }
}

/// Change notification queued by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Inserted(LayerId),
    Updated(LayerId),
    Deleted(LayerId),
    Reordered { from: usize, to: usize },
    /// The whole scene was replaced (undo, redo or load).
    Restored,
}

/// Owns the scene and its history. Every effective mutation bumps the
/// revision, queues a [`SceneEvent`] and checkpoints (unless paused).
#[derive(Debug, Clone)]
pub struct SceneStore {
    scene: Scene,
    history: History,
    max_layers: usize,
    revision: u64,
    events: Vec<SceneEvent>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(MAX_LAYERS, MAX_HISTORY)
    }
}

impl SceneStore {
    pub fn new(max_layers: usize, max_history: usize) -> Self {
        Self {
            scene: Scene::default(),
            history: History::new(Scene::default(), max_history),
            max_layers,
            revision: 0,
            events: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.scene.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scene.contains(id)
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    pub fn order(&self) -> &[LayerId] {
        self.scene.order()
    }

    pub fn layers_ordered(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
        self.scene.layers_ordered()
    }

    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    /// Whether another insert would be dropped.
    pub fn is_full(&self) -> bool {
        self.scene.len() >= self.max_layers
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Append a layer on top. `Ok(false)` when the board is full.
    pub fn insert(&mut self, id: LayerId, layer: Layer) -> Result<bool, SceneError> {
        if self.scene.contains(&id) {
            return Err(SceneError::DuplicateLayer(id));
        }
        if self.is_full() {
            log::debug!("Layer cap of {} reached, dropping insert of {}", self.max_layers, id);
            return Ok(false);
        }
        self.scene.push(id.clone(), layer);
        self.commit(SceneEvent::Inserted(id));
        Ok(true)
    }

    /// Replace a layer in place. False if `id` is absent.
    pub fn update(&mut self, id: &str, layer: Layer) -> bool {
        if !self.scene.replace(id, layer) {
            log::debug!("Ignoring update of missing layer {}", id);
            return false;
        }
        self.commit(SceneEvent::Updated(id.to_string()));
        true
    }

    /// Remove a layer. False (and nothing else) if `id` is absent.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.scene.remove(id).is_none() {
            log::debug!("Ignoring delete of missing layer {}", id);
            return false;
        }
        self.commit(SceneEvent::Deleted(id.to_string()));
        true
    }

    /// Move the id at `from` to `to`, shifting the ones in between.
    pub fn move_in_order(&mut self, from: usize, to: usize) -> Result<(), SceneError> {
        self.scene.relocate(from, to)?;
        if from != to {
            self.commit(SceneEvent::Reordered { from, to });
        }
        Ok(())
    }

    pub fn pause_history(&mut self) {
        self.history.pause();
    }

    /// Resume history. True if the paused changes were committed as one entry.
    pub fn resume_history(&mut self) -> bool {
        self.history.resume(&self.scene)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot. A paused gesture is committed first.
    pub fn undo(&mut self) -> bool {
        self.resume_history();
        match self.history.undo() {
            Some(snapshot) => {
                self.scene = snapshot.clone();
                self.restored();
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot. A paused gesture is committed first.
    pub fn redo(&mut self) -> bool {
        self.resume_history();
        match self.history.redo() {
            Some(snapshot) => {
                self.scene = snapshot.clone();
                self.restored();
                true
            }
            None => false,
        }
    }

    /// Replace the whole scene and start a fresh history from it.
    pub fn load(&mut self, scene: Scene) -> Result<(), SceneError> {
        if !scene.is_consistent() {
            return Err(SceneError::InconsistentScene);
        }
        log::info!("Loading scene with {} layers", scene.len());
        self.history.reset(scene.clone());
        self.scene = scene;
        self.restored();
        Ok(())
    }

    /// Take the queued change notifications.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn commit(&mut self, event: SceneEvent) {
        debug_assert!(self.scene.is_consistent());
        self.history.checkpoint(&self.scene);
        self.bump(event);
    }

    fn restored(&mut self) {
        debug_assert!(self.scene.is_consistent());
        self.bump(SceneEvent::Restored);
    }

    fn bump(&mut self, event: SceneEvent) {
        self.revision += 1;
        self.events.push(event);
    }
}
