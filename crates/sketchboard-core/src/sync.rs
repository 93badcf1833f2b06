//! Collaboration seam.
//!
//! Remote changes come in as [`RemoteMutation`]s and go through the same
//! store contract as local edits. Local edits are queued the same way for a
//! transport to pick up with [`Board::drain_outgoing`]. The transport itself
//! is not part of this crate.

use crate::board::Board;
use crate::layers::{Layer, LayerId};
use crate::presence::ActorId;
use crate::scene::{Scene, SceneError};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One scene mutation, as exchanged with collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteMutation {
    Insert { id: LayerId, layer: Layer },
    Update { id: LayerId, layer: Layer },
    Delete { id: LayerId },
    Move { from: usize, to: usize },
}

/// Presence update from a collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresenceMessage {
    Cursor {
        actor: ActorId,
        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<Point>,
    },
    Selection {
        actor: ActorId,
        ids: Vec<LayerId>,
    },
    Left {
        actor: ActorId,
    },
}

/// Transient message for the user. Never implies a scene rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

/// Mutations that turn `old` into `new` when applied in order.
pub fn diff_scenes(old: &Scene, new: &Scene) -> Vec<RemoteMutation> {
    let mut mutations = Vec::new();

    for id in old.order() {
        if !new.contains(id) {
            mutations.push(RemoteMutation::Delete { id: id.clone() });
        }
    }
    for (id, layer) in new.layers_ordered() {
        match old.get(id) {
            None => mutations.push(RemoteMutation::Insert {
                id: id.clone(),
                layer: layer.clone(),
            }),
            Some(previous) if previous != layer => mutations.push(RemoteMutation::Update {
                id: id.clone(),
                layer: layer.clone(),
            }),
            Some(_) => {}
        }
    }

    // Replay the receiver's order: survivors in old order, then inserts.
    let survivors: HashSet<&LayerId> = new.order().iter().collect();
    let mut order: Vec<&LayerId> = old
        .order()
        .iter()
        .filter(|id| survivors.contains(id))
        .collect();
    order.extend(new.order().iter().filter(|id| !old.contains(id)));

    for (to, target) in new.order().iter().enumerate() {
        let Some(from) = order.iter().position(|id| *id == target) else {
            continue;
        };
        if from != to {
            let id = order.remove(from);
            order.insert(to, id);
            mutations.push(RemoteMutation::Move { from, to });
        }
    }

    mutations
}

impl Board {
    /// Apply a collaborator's mutation through the store contract.
    ///
    /// Missing ids and a full board are silent; index and duplicate errors are
    /// returned since they mean the two sides disagree about the scene.
    pub fn apply_remote(&mut self, mutation: RemoteMutation) -> Result<(), SceneError> {
        match mutation {
            RemoteMutation::Insert { id, layer } => {
                self.store.insert(id, layer)?;
            }
            RemoteMutation::Update { id, layer } => {
                self.store.update(&id, layer);
            }
            RemoteMutation::Delete { id } => {
                self.store.delete(&id);
                self.forget_layer(&id);
            }
            RemoteMutation::Move { from, to } => {
                self.store.move_in_order(from, to)?;
            }
        }
        Ok(())
    }

    pub fn apply_presence(&mut self, message: PresenceMessage) {
        match message {
            PresenceMessage::Cursor { actor, cursor } => self.presence.update_cursor(actor, cursor),
            PresenceMessage::Selection { actor, ids } => self.presence.update_selection(actor, ids),
            PresenceMessage::Left { actor } => {
                self.presence.remove_actor(actor);
            }
        }
    }

    /// Local mutations not yet handed to the transport.
    pub fn drain_outgoing(&mut self) -> Vec<RemoteMutation> {
        std::mem::take(&mut self.outgoing)
    }

    /// Surface a failed call to the sync service. Local state is kept as is.
    pub fn report_network_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("Network failure: {}", message);
        self.notifications.push(Notification { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::BoardConfig;
    use crate::geometry::Bounds;
    use crate::layers::LayerKind;
    use crate::mode::CanvasMode;
    use kurbo::Vec2;

    fn board(actor: ActorId) -> Board {
        Board::new(actor, BoardConfig::default())
    }

    /// Feed everything `from` produced into `to`.
    fn relay(from: &mut Board, to: &mut Board) {
        for mutation in from.drain_outgoing() {
            to.apply_remote(mutation).unwrap();
        }
    }

    #[test]
    fn test_message_shape() {
        let json = serde_json::to_value(RemoteMutation::Move { from: 1, to: 0 }).unwrap();
        assert_eq!(json["type"], "move");
        assert_eq!(json["from"], 1);

        let insert: RemoteMutation = serde_json::from_str(
            r#"{"type":"insert","id":"a","layer":{"type":"Ellipse","x":1.0,"y":2.0,"width":3.0,"height":4.0,"fill":{"r":0,"g":0,"b":0}}}"#,
        )
        .unwrap();
        let RemoteMutation::Insert { id, layer } = insert else {
            panic!("Expected insert");
        };
        assert_eq!(id, "a");
        assert_eq!(layer.kind(), LayerKind::Ellipse);

        let left: PresenceMessage = serde_json::from_str(r#"{"type":"left","actor":4}"#).unwrap();
        assert_eq!(left, PresenceMessage::Left { actor: 4 });
    }

    #[test]
    fn test_local_edits_replicate() {
        let mut alice = board(1);
        let mut bob = board(2);

        let a = alice.insert_layer(LayerKind::Rectangle, Point::ZERO).unwrap();
        let b = alice.insert_layer(LayerKind::Note, Point::new(10.0, 0.0)).unwrap();
        alice.set_text(&b, "hi");
        alice.set_fill(Color::new(9, 9, 9));
        alice.selection.set([a.clone()]);
        alice.move_to_front();
        relay(&mut alice, &mut bob);
        assert_eq!(bob.scene(), alice.scene());

        alice.delete_selected();
        relay(&mut alice, &mut bob);
        assert_eq!(bob.scene(), alice.scene());
        assert!(!bob.scene().contains(&a));
    }

    #[test]
    fn test_undo_redo_replicate() {
        let mut alice = board(1);
        let mut bob = board(2);
        let a = alice.insert_layer(LayerKind::Rectangle, Point::ZERO).unwrap();
        alice.insert_layer(LayerKind::Ellipse, Point::ZERO).unwrap();
        alice.selection.set([a]);
        alice.move_to_front();
        alice.delete_selected();
        relay(&mut alice, &mut bob);

        for _ in 0..3 {
            assert!(alice.undo());
            relay(&mut alice, &mut bob);
            assert_eq!(bob.scene(), alice.scene());
        }
        assert!(alice.redo());
        relay(&mut alice, &mut bob);
        assert_eq!(bob.scene(), alice.scene());
    }

    #[test]
    fn test_remote_delete_cascades_into_selection() {
        let mut board = board(1);
        let id = board.insert_layer(LayerKind::Note, Point::ZERO).unwrap();
        assert!(board.begin_text_edit(&id));
        board.drain_outgoing();

        board
            .apply_remote(RemoteMutation::Delete { id: id.clone() })
            .unwrap();
        assert!(!board.selection().contains(&id));
        assert_eq!(board.mode(), &CanvasMode::None);
        // Remote changes are not echoed back.
        assert!(board.drain_outgoing().is_empty());

        // A second delete of the same id is a harmless race.
        board.apply_remote(RemoteMutation::Delete { id }).unwrap();
    }

    #[test]
    fn test_remote_errors() {
        let mut board = board(1);
        let id = board.insert_layer(LayerKind::Rectangle, Point::ZERO).unwrap();
        let layer = board.scene().get(&id).unwrap().clone();

        assert!(matches!(
            board.apply_remote(RemoteMutation::Insert { id, layer: layer.clone() }),
            Err(SceneError::DuplicateLayer(_))
        ));
        assert!(matches!(
            board.apply_remote(RemoteMutation::Move { from: 0, to: 3 }),
            Err(SceneError::InvalidIndex { index: 3, len: 1 })
        ));
        board
            .apply_remote(RemoteMutation::Update {
                id: "ghost".into(),
                layer: layer.translated(Vec2::new(1.0, 1.0)),
            })
            .unwrap();
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_presence_messages() {
        let mut board = board(1);
        board.apply_presence(PresenceMessage::Cursor {
            actor: 2,
            cursor: Some(Point::new(3.0, 4.0)),
        });
        board.apply_presence(PresenceMessage::Selection {
            actor: 2,
            ids: vec!["x".into()],
        });
        assert_eq!(board.presence().get(2).unwrap().cursor, Some(Point::new(3.0, 4.0)));
        assert!(board.highlights().contains_key("x"));

        board.apply_presence(PresenceMessage::Left { actor: 2 });
        assert!(board.presence().is_empty());
        assert!(board.scene().is_empty());
    }

    #[test]
    fn test_network_failure_keeps_scene() {
        let mut board = board(1);
        board.insert_layer(LayerKind::Rectangle, Point::ZERO).unwrap();
        let before = board.scene().clone();

        board.report_network_failure("favorite failed");
        assert_eq!(board.scene(), &before);
        assert_eq!(
            board.drain_notifications(),
            vec![Notification {
                message: "favorite failed".into()
            }]
        );
        assert!(board.drain_notifications().is_empty());
    }

    #[test]
    fn test_diff_reorders() {
        let square = Layer::from_kind(
            LayerKind::Rectangle,
            Bounds::new(0.0, 0.0, 1.0, 1.0),
            Color::black(),
        )
        .unwrap();
        let mut old = Scene::default();
        for id in ["a", "b", "c"] {
            old.push(id.into(), square.clone());
        }
        let mut new = old.clone();
        new.relocate(2, 0).unwrap();
        new.remove("b");

        let mut replay = old.clone();
        for mutation in diff_scenes(&old, &new) {
            match mutation {
                RemoteMutation::Delete { id } => {
                    replay.remove(&id);
                }
                RemoteMutation::Move { from, to } => replay.relocate(from, to).unwrap(),
                other => panic!("Unexpected {:?}", other),
            }
        }
        assert_eq!(replay, new);
    }
}
