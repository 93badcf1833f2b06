//! Bounded undo/redo log of scene snapshots.

use crate::scene::Scene;
use std::collections::VecDeque;

/// Maximum number of snapshots to keep.
pub const MAX_HISTORY: usize = 30;

/// Snapshot log with a cursor.
///
/// The entry under the cursor always equals the scene as last committed.
/// While paused, checkpoints are suppressed and remembered as `dirty`; the
/// matching [`History::resume`] commits a single checkpoint for all of them.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Scene>,
    cursor: usize,
    max_entries: usize,
    tracking: bool,
    dirty: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Scene::default(), MAX_HISTORY)
    }
}

impl History {
    /// Start a log seeded with `initial` at cursor 0. `max_entries` is at least 1.
    pub fn new(initial: Scene, max_entries: usize) -> Self {
        let mut entries = VecDeque::with_capacity(max_entries.max(1));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            max_entries: max_entries.max(1),
            tracking: true,
            dirty: false,
        }
    }

    /// Record `scene` as the newest entry. Returns false if suppressed by a pause.
    pub fn checkpoint(&mut self, scene: &Scene) -> bool {
        if !self.tracking {
            self.dirty = true;
            return false;
        }

        // A new edit after undo discards the undone future.
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(scene.clone());
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back. Returns the snapshot to restore, `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Scene> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward. Returns the snapshot to restore, `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Scene> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Whether a checkpoint was suppressed since the last pause.
    pub fn has_pending(&self) -> bool {
        self.dirty
    }

    /// Stop recording checkpoints.
    pub fn pause(&mut self) {
        self.tracking = false;
    }

    /// Start recording again. If anything changed while paused, `scene` is
    /// committed as one checkpoint and true is returned.
    pub fn resume(&mut self, scene: &Scene) -> bool {
        if self.tracking {
            return false;
        }
        self.tracking = true;
        if std::mem::take(&mut self.dirty) {
            self.checkpoint(scene)
        } else {
            false
        }
    }

    /// Drop every entry and start over from `scene`.
    pub fn reset(&mut self, scene: Scene) {
        self.entries.clear();
        self.entries.push_back(scene);
        self.cursor = 0;
        self.tracking = true;
        self.dirty = false;
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&Scene> {
        self.entries.get(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Bounds;
    use crate::layers::{Layer, RectangleLayer};

    fn scene_with(n: usize) -> Scene {
        let mut scene = Scene::default();
        for i in 0..n {
            let layer = Layer::Rectangle(RectangleLayer::new(
                Bounds::new(i as f64, 0.0, 10.0, 10.0),
                Color::black(),
            ));
            scene.push(format!("layer-{i}"), layer);
        }
        scene
    }

    #[test]
    fn test_seeded_with_initial() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::default();
        history.checkpoint(&scene_with(1));
        history.checkpoint(&scene_with(2));

        assert_eq!(history.undo(), Some(&scene_with(1)));
        let len = history.len();
        assert_eq!(history.redo(), Some(&scene_with(2)));
        assert_eq!(history.len(), len);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_checkpoint_after_undo_truncates() {
        let mut history = History::default();
        history.checkpoint(&scene_with(1));
        history.checkpoint(&scene_with(2));
        history.undo();
        history.checkpoint(&scene_with(3));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&scene_with(3)));
    }

    #[test]
    fn test_bounded_to_max() {
        let mut history = History::default();
        for i in 1..=40 {
            history.checkpoint(&scene_with(i));
        }
        assert_eq!(history.len(), MAX_HISTORY);

        let mut undos = 0;
        while history.undo().is_some() {
            undos += 1;
        }
        assert_eq!(undos, MAX_HISTORY - 1);
        // Oldest retained snapshot, not the evicted empty seed.
        assert_eq!(history.current(), Some(&scene_with(40 - MAX_HISTORY + 1)));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_pause_suppresses_until_resume() {
        let mut history = History::default();
        history.pause();
        assert!(!history.checkpoint(&scene_with(1)));
        assert!(!history.checkpoint(&scene_with(2)));
        assert_eq!(history.len(), 1);
        assert!(history.has_pending());

        assert!(history.resume(&scene_with(2)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&scene_with(2)));
    }

    #[test]
    fn test_resume_without_changes_is_silent() {
        let mut history = History::default();
        history.pause();
        assert!(!history.resume(&scene_with(5)));
        assert_eq!(history.len(), 1);

        // Resume while tracking is a no-op too.
        assert!(!history.resume(&scene_with(5)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut history = History::default();
        history.checkpoint(&scene_with(1));
        history.pause();
        history.reset(scene_with(3));
        assert_eq!(history.len(), 1);
        assert!(history.is_tracking());
        assert_eq!(history.current(), Some(&scene_with(3)));
    }
}
