//! Board configuration.

use crate::color::Color;
use crate::history::MAX_HISTORY;
use crate::scene::MAX_LAYERS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables of a board session. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Layers a board may hold; further inserts are dropped.
    pub max_layers: usize,
    /// Undo snapshots kept.
    pub max_history: usize,
    /// Manhattan distance a press must travel before it becomes a marquee.
    pub selection_net_threshold: f64,
    /// Side of a layer placed with a click.
    pub default_layer_size: f64,
    /// RDP tolerance applied to pencil strokes on commit. 0 keeps every sample.
    pub stroke_simplify_tolerance: f64,
    /// Fill of new layers until the user picks one.
    pub default_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_layers: MAX_LAYERS,
            max_history: MAX_HISTORY,
            selection_net_threshold: 5.0,
            default_layer_size: 100.0,
            stroke_simplify_tolerance: 0.0,
            default_color: Color::black(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            return Err(ConfigError::Invalid("max_history must be at least 1".into()));
        }
        for (name, value) in [
            ("selection_net_threshold", self.selection_net_threshold),
            ("default_layer_size", self.default_layer_size),
            ("stroke_simplify_tolerance", self.stroke_simplify_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
