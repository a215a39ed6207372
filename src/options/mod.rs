//! Centralized replay/rendering options with TOML preset support.
//!
//! All tweakable settings (playback range and pacing, display toggles and
//! pheromone colorizer, geometry factors, animation easing) are consolidated
//! here. Options serialize to/from TOML so a render configuration can be
//! stored next to the replay it belongs to.

mod animation;
mod display;
mod geometry;
mod playback;

use std::path::Path;

pub use animation::AnimationOptions;
pub use display::{ColorizerMode, DisplayOptions};
pub use geometry::GeometryOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ColonyError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Step range and per-step duration.
    pub playback: PlaybackOptions,
    /// Display toggles and pheromone coloring.
    pub display: DisplayOptions,
    /// Canvas and shape sizing factors.
    pub geometry: GeometryOptions,
    /// Interpolation curve shared by every generator.
    pub animation: AnimationOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ColonyError> {
        toml::from_str(content)
            .map_err(|e| ColonyError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ColonyError> {
        let content =
            std::fs::read_to_string(path).map_err(ColonyError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ColonyError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ColonyError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ColonyError::Io)?;
        }
        std::fs::write(path, content).map_err(ColonyError::Io)
    }
}
