//! The board: one editing session's state and the operations that drive it.
//!
//! Pointer handling lives in [`crate::interaction`], collaborator entry
//! points in [`crate::sync`]; both are further `impl Board` blocks.

use crate::camera::Camera;
use crate::color::Color;
use crate::config::BoardConfig;
use crate::geometry::{Bounds, compute_bounds};
use crate::layers::{Layer, LayerId, LayerKind, StrokePoint, new_layer_id};
use crate::mode::CanvasMode;
use crate::presence::{ActorId, Presence, PresenceMap, layer_highlights};
use crate::scene::{Scene, SceneError, SceneEvent, SceneStore};
use crate::selection::SelectionTracker;
use crate::sync::{Notification, RemoteMutation, diff_scenes};
use kurbo::Point;
use std::collections::HashMap;

/// State of one board editing session.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) config: BoardConfig,
    pub(crate) local_actor: ActorId,
    pub(crate) store: SceneStore,
    pub(crate) selection: SelectionTracker,
    pub(crate) presence: PresenceMap,
    pub(crate) mode: CanvasMode,
    pub(crate) camera: Camera,
    /// In-progress pencil stroke, canvas coordinates.
    pub(crate) pencil_draft: Option<Vec<StrokePoint>>,
    /// Local pointer in canvas coordinates, `None` outside the viewport.
    pub(crate) cursor: Option<Point>,
    pub(crate) last_used_color: Color,
    /// Color the current pencil draft is drawn with.
    pub(crate) pen_color: Color,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) outgoing: Vec<RemoteMutation>,
}

impl Board {
    pub fn new(local_actor: ActorId, config: BoardConfig) -> Self {
        let store = SceneStore::new(config.max_layers, config.max_history);
        Self {
            local_actor,
            store,
            selection: SelectionTracker::new(),
            presence: PresenceMap::new(),
            mode: CanvasMode::None,
            camera: Camera::new(),
            pencil_draft: None,
            cursor: None,
            last_used_color: config.default_color,
            pen_color: config.default_color,
            notifications: Vec::new(),
            outgoing: Vec::new(),
            config,
        }
    }

    // --- Read surface ---

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn local_actor(&self) -> ActorId {
        self.local_actor
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn scene(&self) -> &Scene {
        self.store.scene()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn presence(&self) -> &PresenceMap {
        &self.presence
    }

    pub fn mode(&self) -> &CanvasMode {
        &self.mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pencil_draft(&self) -> Option<&[StrokePoint]> {
        self.pencil_draft.as_deref()
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn last_used_color(&self) -> Color {
        self.last_used_color
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// What collaborators should see of the local actor.
    pub fn local_presence(&self) -> Presence {
        Presence {
            cursor: self.cursor,
            selection: self.selection.ids().to_vec(),
        }
    }

    /// Union of the bounds of the selected layers that still exist.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        compute_bounds(self.selection.ids().iter().filter_map(|id| self.store.get(id)))
    }

    /// Outline colors for layers selected locally or by collaborators.
    pub fn highlights(&self) -> HashMap<LayerId, Color> {
        layer_highlights(self.local_actor, self.selection.ids(), &self.presence)
    }

    /// Topmost layer under a screen point.
    pub fn layer_at(&self, screen_point: Point) -> Option<LayerId> {
        let point = self.camera.screen_to_canvas(screen_point);
        let order = self.store.order();
        order
            .iter()
            .rev()
            .find(|id| self.store.get(id).is_some_and(|layer| layer.hit_test(point)))
            .cloned()
    }

    pub fn drain_scene_events(&mut self) -> Vec<SceneEvent> {
        self.store.drain_events()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // --- Affordances ---

    pub fn set_mode(&mut self, mode: CanvasMode) {
        if mode != CanvasMode::Pencil {
            self.pencil_draft = None;
        }
        self.mode = mode;
    }

    /// Place a `default_layer_size` square of `kind` with its corner at
    /// `point` (canvas space) and select it. `None` if the board is full or
    /// `kind` cannot be placed by click.
    pub fn insert_layer(&mut self, kind: LayerKind, point: Point) -> Option<LayerId> {
        if self.store.is_full() {
            log::debug!("Board full, not inserting {:?}", kind);
            return None;
        }
        let size = self.config.default_layer_size;
        let bounds = Bounds::new(point.x, point.y, size, size);
        let Some(layer) = Layer::from_kind(kind, bounds, self.last_used_color) else {
            log::warn!("Cannot insert a {:?} layer by click", kind);
            return None;
        };

        let id = new_layer_id();
        if !self.put_layer(id.clone(), layer) {
            return None;
        }
        self.selection.select(id.clone());
        self.mode = CanvasMode::None;
        self.store.resume_history();
        Some(id)
    }

    /// Recolor the selection and remember the color for new layers.
    pub fn set_fill(&mut self, fill: Color) {
        self.last_used_color = fill;
        let ids = self.selection.ids().to_vec();
        self.batched(|board| {
            for id in ids {
                if let Some(layer) = board.store.get(&id) {
                    let next = layer.with_fill(fill);
                    board.replace_layer(&id, next);
                }
            }
        });
    }

    /// Delete every selected layer. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        let removed = self.batched(|board| ids.iter().filter(|id| board.remove_layer(id)).count());
        self.selection.clear();
        removed
    }

    /// Raise the selection to the top, keeping its internal stacking.
    pub fn move_to_front(&mut self) {
        let indices = self.selected_indices();
        if indices.is_empty() {
            return;
        }
        let last = self.store.len() - 1;
        let count = indices.len();
        self.batched(|board| {
            // Back to front so earlier indices are not shifted by later moves.
            for (i, &from) in indices.iter().enumerate().rev() {
                let to = last - (count - 1 - i);
                if let Err(err) = board.reorder(from, to) {
                    log::warn!("move_to_front: {}", err);
                }
            }
        });
    }

    /// Lower the selection to the bottom, keeping its internal stacking.
    pub fn move_to_back(&mut self) {
        let indices = self.selected_indices();
        if indices.is_empty() {
            return;
        }
        self.batched(|board| {
            for (to, &from) in indices.iter().enumerate() {
                if let Err(err) = board.reorder(from, to) {
                    log::warn!("move_to_back: {}", err);
                }
            }
        });
    }

    /// Enter text editing on a Text or Note layer.
    pub fn begin_text_edit(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(layer) if layer.kind().is_textual() => {
                self.mode = CanvasMode::TextEditing { id: id.to_string() };
                true
            }
            Some(layer) => {
                log::debug!("{:?} layer {} has no text", layer.kind(), id);
                false
            }
            None => {
                log::debug!("Cannot edit missing layer {}", id);
                false
            }
        }
    }

    /// Leave text editing (blur).
    pub fn end_text_edit(&mut self) {
        if self.mode.is_text_editing() {
            self.mode = CanvasMode::None;
        }
    }

    /// Replace the text of a Text/Note layer.
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.store.get(id) {
            Some(layer) if layer.kind().is_textual() => {
                let next = layer.with_text(text);
                self.replace_layer(id, next)
            }
            _ => false,
        }
    }

    pub fn pause_history(&mut self) {
        self.store.pause_history();
    }

    pub fn resume_history(&mut self) -> bool {
        self.store.resume_history()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.end_drag();
        let before = self.store.scene().clone();
        if !self.store.undo() {
            return false;
        }
        self.after_restore(&before);
        true
    }

    pub fn redo(&mut self) -> bool {
        self.end_drag();
        let before = self.store.scene().clone();
        if !self.store.redo() {
            return false;
        }
        self.after_restore(&before);
        true
    }

    /// Start a session from a persisted scene. History restarts from it.
    pub fn load_scene(&mut self, scene: Scene) -> Result<(), SceneError> {
        self.store.load(scene)?;
        self.mode = CanvasMode::None;
        self.pencil_draft = None;
        self.prune_selection();
        log::info!("Board loaded with {} layers", self.store.len());
        Ok(())
    }

    // --- Store access that keeps selection and sync in step ---

    pub(crate) fn put_layer(&mut self, id: LayerId, layer: Layer) -> bool {
        match self.store.insert(id.clone(), layer.clone()) {
            Ok(true) => {
                self.outgoing.push(RemoteMutation::Insert { id, layer });
                true
            }
            Ok(false) => false,
            Err(err) => {
                log::warn!("Insert rejected: {}", err);
                false
            }
        }
    }

    pub(crate) fn replace_layer(&mut self, id: &str, layer: Layer) -> bool {
        if !self.store.update(id, layer.clone()) {
            return false;
        }
        self.outgoing.push(RemoteMutation::Update {
            id: id.to_string(),
            layer,
        });
        true
    }

    pub(crate) fn remove_layer(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        if removed {
            self.outgoing.push(RemoteMutation::Delete { id: id.to_string() });
        }
        self.forget_layer(id);
        removed
    }

    pub(crate) fn reorder(&mut self, from: usize, to: usize) -> Result<(), SceneError> {
        self.store.move_in_order(from, to)?;
        if from != to {
            self.outgoing.push(RemoteMutation::Move { from, to });
        }
        Ok(())
    }

    /// Drop every local reference to a layer that no longer exists.
    pub(crate) fn forget_layer(&mut self, id: &str) {
        self.selection.remove(id);
        if matches!(&self.mode, CanvasMode::TextEditing { id: editing } if editing == id) {
            self.mode = CanvasMode::None;
        }
    }

    /// Run `edit` as a single history entry. Inside a gesture that already
    /// paused history, the gesture's own resume commits it instead.
    fn batched<R>(&mut self, edit: impl FnOnce(&mut Self) -> R) -> R {
        let owns_pause = self.store.history().is_tracking();
        if owns_pause {
            self.store.pause_history();
        }
        let result = edit(self);
        if owns_pause {
            self.store.resume_history();
        }
        result
    }

    /// Undo and redo end a drag; the jump has already committed its batch.
    fn end_drag(&mut self) {
        if matches!(
            self.mode,
            CanvasMode::Translating { .. } | CanvasMode::Resizing { .. }
        ) {
            self.mode = CanvasMode::None;
        }
    }

    fn after_restore(&mut self, before: &Scene) {
        self.outgoing.extend(diff_scenes(before, self.store.scene()));
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let store = &self.store;
        self.selection.retain(|id| store.contains(id));
        let editing_gone = match &self.mode {
            CanvasMode::TextEditing { id } => !self.store.contains(id),
            _ => false,
        };
        if editing_gone {
            self.mode = CanvasMode::None;
        }
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.store
            .order()
            .iter()
            .enumerate()
            .filter(|(_, id)| self.selection.contains(id))
            .map(|(index, _)| index)
            .collect()
    }
}
