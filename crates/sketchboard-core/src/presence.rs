//! Presence of collaborators: cursors and selections per actor.

use crate::color::{Color, actor_color};
use crate::layers::LayerId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Connection id of a collaborator.
pub type ActorId = u64;

/// Ephemeral state of one actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    /// Canvas-space cursor, `None` while outside the viewport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Point>,
    #[serde(default)]
    pub selection: Vec<LayerId>,
}

/// Presence of remote actors. Only read for highlighting.
#[derive(Debug, Clone, Default)]
pub struct PresenceMap {
    actors: BTreeMap<ActorId, Presence>,
}

impl PresenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_cursor(&mut self, actor: ActorId, cursor: Option<Point>) {
        self.actors.entry(actor).or_default().cursor = cursor;
    }

    pub fn update_selection(&mut self, actor: ActorId, selection: Vec<LayerId>) {
        self.actors.entry(actor).or_default().selection = selection;
    }

    /// Forget an actor that left. Returns whether it was known.
    pub fn remove_actor(&mut self, actor: ActorId) -> bool {
        self.actors.remove(&actor).is_some()
    }

    pub fn get(&self, actor: ActorId) -> Option<&Presence> {
        self.actors.get(&actor)
    }

    /// Actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Presence)> {
        self.actors.iter().map(|(actor, presence)| (*actor, presence))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Outline color for every layer somebody has selected.
///
/// The local selection wins over remote ones on the same layer.
pub fn layer_highlights(
    local_actor: ActorId,
    local_selection: &[LayerId],
    presence: &PresenceMap,
) -> HashMap<LayerId, Color> {
    let mut highlights = HashMap::new();
    for (actor, state) in presence.actors() {
        if actor == local_actor {
            continue;
        }
        let color = actor_color(actor);
        for id in &state.selection {
            highlights.entry(id.clone()).or_insert(color);
        }
    }

    let local = actor_color(local_actor);
    for id in local_selection {
        highlights.insert(id.clone(), local);
    }
    highlights
}
