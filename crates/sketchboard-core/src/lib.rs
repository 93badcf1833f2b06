//! Sketchboard Core Library
//!
//! Scene graph, undo history, selection, presence and the pointer
//! interaction state machine of a collaborative whiteboard. Everything runs
//! synchronously on the thread that feeds it events.

pub mod board;
pub mod camera;
pub mod color;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod interaction;
pub mod layers;
pub mod mode;
pub mod presence;
pub mod scene;
pub mod selection;
pub mod storage;
pub mod sync;

pub use board::Board;
pub use camera::Camera;
pub use color::{Color, actor_color};
pub use config::{BoardConfig, ConfigError};
pub use geometry::{Bounds, GeometryError, Side};
pub use history::{History, MAX_HISTORY};
pub use input::{KeyEvent, Modifiers, PointerEvent, WheelEvent};
pub use layers::{Layer, LayerId, LayerKind, StrokePoint};
pub use mode::CanvasMode;
pub use presence::{ActorId, Presence, PresenceMap};
pub use scene::{MAX_LAYERS, Scene, SceneError, SceneEvent, SceneStore};
pub use selection::SelectionTracker;
pub use storage::{MemoryStorage, Storage, StorageError};
pub use sync::{Notification, PresenceMessage, RemoteMutation};
