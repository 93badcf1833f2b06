//! Local selection tracking.

use crate::layers::LayerId;

/// Selected layer ids of the local actor, in selection order.
///
/// Ids are not checked against the scene; the board prunes them when layers
/// go away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    ids: Vec<LayerId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole selection. Duplicate ids keep their first position.
    pub fn set<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = LayerId>,
    {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Select exactly one layer.
    pub fn select(&mut self, id: LayerId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Clear the selection. Returns false if it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.ids.clear();
        true
    }

    /// Drop one id. Returns whether it was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|other| other != id);
        self.ids.len() != before
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&LayerId) -> bool,
    {
        self.ids.retain(|id| keep(id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|other| other == id)
    }

    pub fn ids(&self) -> &[LayerId] {
        &self.ids
    }

    /// The first selected id: the resize target.
    pub fn first(&self) -> Option<&LayerId> {
        self.ids.first()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
