//! Pointer and keyboard handling: the board's mode state machine.

use crate::board::Board;
use crate::geometry::{
    Bounds, Side, find_intersecting_layers, path_to_layer, resize_from_handle,
    resize_handle_points, simplify_stroke,
};
use crate::input::{KeyEvent, PointerEvent, ShortcutAction, WheelEvent};
use crate::layers::{Layer, LayerId, StrokePoint, new_layer_id};
use crate::mode::CanvasMode;
use kurbo::Point;

/// Pick radius of a resize handle, in screen units.
pub const HANDLE_HIT_RADIUS: f64 = 6.0;

impl Board {
    /// Pointer pressed on empty canvas.
    pub fn on_pointer_down(&mut self, event: PointerEvent) {
        let point = self.camera.screen_to_canvas(event.position);
        match self.mode {
            // Inserting resolves on pointer-up.
            CanvasMode::Inserting { .. } | CanvasMode::TextEditing { .. } => {}
            CanvasMode::Pencil => self.start_drawing(point, event.pressure),
            _ => self.mode = CanvasMode::Pressing { origin: point },
        }
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        let point = self.camera.screen_to_canvas(event.position);
        self.cursor = Some(point);

        match self.mode.clone() {
            CanvasMode::Pressing { origin } => self.start_multi_selection(origin, point),
            CanvasMode::SelectionNet { origin, .. } => self.update_selection_net(origin, point),
            CanvasMode::Translating { current } => self.translate_selected(current, point),
            CanvasMode::Resizing {
                initial_bounds,
                corner,
                id,
                initial_layer,
            } => self.resize_layer(&id, &initial_layer, initial_bounds, corner, point),
            CanvasMode::Pencil => self.continue_drawing(point, &event),
            CanvasMode::None | CanvasMode::Inserting { .. } | CanvasMode::TextEditing { .. } => {}
        }
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) {
        if self.mode.is_text_editing() {
            return;
        }
        let point = self.camera.screen_to_canvas(event.position);
        self.store.resume_history();

        match self.mode.clone() {
            CanvasMode::None | CanvasMode::Pressing { .. } => {
                self.selection.clear();
                self.mode = CanvasMode::None;
            }
            CanvasMode::Pencil => self.commit_drawing(),
            CanvasMode::Inserting { kind } => {
                self.insert_layer(kind, point);
            }
            _ => self.mode = CanvasMode::None,
        }
    }

    /// Pointer left the viewport. Abandoned gestures are settled here instead
    /// of waiting for a pointer-up that will never come.
    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        match self.mode {
            CanvasMode::Translating { .. } | CanvasMode::Resizing { .. } => {
                self.store.resume_history();
                self.mode = CanvasMode::None;
            }
            CanvasMode::Pencil => self.pencil_draft = None,
            CanvasMode::Pressing { .. } | CanvasMode::SelectionNet { .. } => {
                self.mode = CanvasMode::None;
            }
            CanvasMode::None | CanvasMode::Inserting { .. } | CanvasMode::TextEditing { .. } => {}
        }
    }

    /// Pointer pressed on a layer: start dragging the selection.
    pub fn on_layer_pointer_down(&mut self, id: &str, event: PointerEvent) {
        if matches!(
            self.mode,
            CanvasMode::Pencil | CanvasMode::Inserting { .. } | CanvasMode::TextEditing { .. }
        ) {
            return;
        }
        if !self.store.contains(id) {
            log::debug!("Pointer down on missing layer {}", id);
            return;
        }

        // Paused for the whole drag; selection changes never checkpoint.
        self.store.pause_history();
        if !self.selection.contains(id) {
            self.selection.select(id.to_string());
        }
        let point = self.camera.screen_to_canvas(event.position);
        self.mode = CanvasMode::Translating { current: point };
    }

    /// Pointer pressed on one of the selection's resize handles. The first
    /// selected layer is the one resized.
    pub fn on_resize_handle_pointer_down(&mut self, corner: Side, initial_bounds: Bounds) {
        let Some(id) = self.selection.first().cloned() else {
            log::debug!("Resize handle pressed with nothing selected");
            return;
        };
        let Some(layer) = self.store.get(&id) else {
            return;
        };
        let initial_layer = Box::new(layer.clone());
        self.store.pause_history();
        self.mode = CanvasMode::Resizing {
            initial_bounds,
            corner,
            id,
            initial_layer,
        };
    }

    pub fn on_wheel(&mut self, event: WheelEvent) {
        self.camera.scroll(event.delta);
    }

    /// Handle a global shortcut. Returns whether the key was consumed.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        if self.mode.is_text_editing() {
            return false;
        }
        let Some(action) = ShortcutAction::from_key(event) else {
            return false;
        };
        match action {
            ShortcutAction::DeleteSelected => {
                self.delete_selected();
            }
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Deselect => {
                self.selection.clear();
                self.set_mode(CanvasMode::None);
            }
        }
        true
    }

    /// Resize handle under a screen point, for the single selected layer.
    pub fn handle_at(&self, screen_point: Point) -> Option<(Side, Bounds)> {
        if self.selection.len() != 1 {
            return None;
        }
        let bounds = self.selection_bounds()?;
        resize_handle_points(bounds)
            .into_iter()
            .find(|(_, handle)| {
                (self.camera.canvas_to_screen(*handle) - screen_point).hypot() <= HANDLE_HIT_RADIUS
            })
            .map(|(side, _)| (side, bounds))
    }

    fn start_multi_selection(&mut self, origin: Point, point: Point) {
        let distance = (point.x - origin.x).abs() + (point.y - origin.y).abs();
        if distance > self.config.selection_net_threshold {
            self.mode = CanvasMode::SelectionNet {
                origin,
                current: point,
            };
        }
    }

    fn update_selection_net(&mut self, origin: Point, current: Point) {
        let scene = self.store.scene();
        let ids = find_intersecting_layers(scene.order(), scene.layers(), origin, current);
        self.selection.set(ids);
        self.mode = CanvasMode::SelectionNet { origin, current };
    }

    fn translate_selected(&mut self, current: Point, point: Point) {
        let offset = point - current;
        let ids: Vec<LayerId> = self.selection.ids().to_vec();
        for id in ids {
            if let Some(layer) = self.store.get(&id) {
                let next = layer.translated(offset);
                self.replace_layer(&id, next);
            }
        }
        self.mode = CanvasMode::Translating { current: point };
    }

    fn resize_layer(
        &mut self,
        id: &str,
        initial_layer: &Layer,
        initial_bounds: Bounds,
        corner: Side,
        point: Point,
    ) {
        let bounds = resize_from_handle(initial_bounds, corner, point);
        self.replace_layer(id, initial_layer.resized(bounds));
    }

    fn start_drawing(&mut self, point: Point, pressure: f64) {
        self.pen_color = self.last_used_color;
        self.pencil_draft = Some(vec![StrokePoint::new(point.x, point.y, pressure)]);
    }

    fn continue_drawing(&mut self, point: Point, event: &PointerEvent) {
        if !event.is_primary_down() {
            return;
        }
        let Some(draft) = self.pencil_draft.as_mut() else {
            return;
        };
        // A repeat of a lone first sample would make a zero-length segment.
        if let [only] = draft.as_slice() {
            if only.x == point.x && only.y == point.y {
                return;
            }
        }
        draft.push(StrokePoint::new(point.x, point.y, event.pressure));
    }

    fn commit_drawing(&mut self) {
        self.mode = CanvasMode::Pencil;
        let Some(draft) = self.pencil_draft.take() else {
            return;
        };
        if draft.len() < 2 || self.store.is_full() {
            log::debug!("Discarding pencil draft of {} points", draft.len());
            return;
        }

        let points = simplify_stroke(&draft, self.config.stroke_simplify_tolerance);
        match path_to_layer(&points, self.pen_color) {
            Ok(layer) => {
                self.put_layer(new_layer_id(), layer);
            }
            Err(err) => log::warn!("Pencil commit failed: {}", err),
        }
    }
}
