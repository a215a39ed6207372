use std::ops::Range;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Which steps to render and how long each one lasts.
pub struct PlaybackOptions {
    /// Seconds spent animating one simulation step. Negative values are
    /// treated as zero (instant steps).
    #[schemars(title = "Time Per Step")]
    pub time_per_step: f32,
    /// First step to render.
    #[schemars(title = "Render Start")]
    pub render_start: usize,
    /// Exclusive end step; `None` renders to the end of the replay.
    #[schemars(title = "Render End")]
    pub render_end: Option<usize>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            time_per_step: 1.0,
            render_start: 0,
            render_end: None,
        }
    }
}

impl PlaybackOptions {
    /// Step duration, with negative or non-finite settings coerced to zero.
    #[must_use]
    pub fn step_duration(&self) -> Duration {
        if self.time_per_step.is_finite() && self.time_per_step > 0.0 {
            Duration::from_secs_f32(self.time_per_step)
        } else {
            Duration::ZERO
        }
    }

    /// Step indices to render for a replay of `len` steps.
    #[must_use]
    pub fn step_range(&self, len: usize) -> Range<usize> {
        let end = self.render_end.map_or(len, |end| end.min(len));
        let start = self.render_start.min(end);
        start..end
    }
}
