use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How node fill colors are derived from pheromone levels.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorizerMode {
    /// Plain black fill.
    #[default]
    None,
    /// Pheromone value decoded as an 8-bit `RRRGGGBB` color.
    EightBit,
    /// Pheromone value looked up in [`DisplayOptions::palette`].
    Palette,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Display toggles and pheromone coloring.
pub struct DisplayOptions {
    /// Whether to draw the per-team name/score legend.
    #[schemars(title = "Show Team Legend")]
    pub show_team_legend: bool,
    /// Pheromone coloring strategy.
    #[schemars(title = "Colorizer")]
    pub colorizer: ColorizerMode,
    /// Pheromone value (decimal form) to color string, for
    /// [`ColorizerMode::Palette`].
    #[schemars(skip)]
    pub palette: BTreeMap<String, String>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_team_legend: true,
            colorizer: ColorizerMode::None,
            palette: BTreeMap::new(),
        }
    }
}
