//! Replay files and the step-by-step playback driver.
//!
//! A replay is an ordered sequence of raw snapshots. [`ReplayPlayer`] walks
//! the configured step range: it builds a [`StepScene`] for step `i` paired
//! with step `i + 1`, advances it as time passes, and moves on once the
//! step has played through.

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use crate::error::ColonyError;
use crate::options::{Options, PlaybackOptions};
use crate::scene::StepScene;
use crate::util::color::Colorizer;
use crate::world::{RawSnapshot, WorldSnapshot};

/// An ordered snapshot sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replay {
    snapshots: Vec<RawSnapshot>,
}

impl Replay {
    /// Replay over already-decoded snapshots.
    #[must_use]
    pub fn new(snapshots: Vec<RawSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Parse a replay file.
    ///
    /// Accepts either a JSON array of snapshots or an object of the form
    /// `{"data": {"0": {...}, "1": {...}}}` whose keys are step indices;
    /// keyed steps are ordered numerically.
    pub fn from_json(content: &str) -> Result<Self, ColonyError> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Array(_) => Ok(Self::new(serde_json::from_value(value)?)),
            Value::Object(mut object) => {
                let data = object.remove("data").ok_or_else(|| {
                    ColonyError::malformed("replay object has no \"data\" field")
                })?;
                let keyed: BTreeMap<String, RawSnapshot> =
                    serde_json::from_value(data)?;
                let mut steps = Vec::with_capacity(keyed.len());
                for (key, snapshot) in keyed {
                    let index: u64 = key.trim().parse().map_err(|_| {
                        ColonyError::malformed(format!(
                            "replay step key '{key}' is not a step index"
                        ))
                    })?;
                    steps.push((index, snapshot));
                }
                steps.sort_by_key(|(index, _)| *index);
                Ok(Self::new(
                    steps.into_iter().map(|(_, snapshot)| snapshot).collect(),
                ))
            }
            _ => Err(ColonyError::malformed(
                "replay must be an array or an object",
            )),
        }
    }

    /// Read and parse a replay file from disk.
    pub fn load(path: &Path) -> Result<Self, ColonyError> {
        let content = std::fs::read_to_string(path)?;
        let replay = Self::from_json(&content)?;
        log::info!("loaded {} steps from {}", replay.len(), path.display());
        Ok(replay)
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the replay has no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Raw snapshot `index`.
    #[must_use]
    pub fn raw(&self, index: usize) -> Option<&RawSnapshot> {
        self.snapshots.get(index)
    }

    /// Normalized snapshot `index` on its own.
    pub fn snapshot(&self, index: usize) -> Result<WorldSnapshot, ColonyError> {
        let raw = self.snapshots.get(index).ok_or(ColonyError::StepOutOfRange {
            step: index,
            len: self.len(),
        })?;
        WorldSnapshot::build(raw).map_err(|e| e.at_step(index))
    }

    /// Snapshot `index` with next-state fields filled from `index + 1`.
    ///
    /// The final snapshot has no successor and comes back static unless it
    /// carries inline next-state values.
    pub fn step_world(&self, index: usize) -> Result<WorldSnapshot, ColonyError> {
        let current = self.snapshot(index)?;
        if index + 1 < self.len() {
            let next = self.snapshot(index + 1)?;
            Ok(current.with_next(&next))
        } else {
            Ok(current)
        }
    }

    /// Step indices selected by the playback options.
    #[must_use]
    pub fn step_range(&self, playback: &PlaybackOptions) -> Range<usize> {
        playback.step_range(self.len())
    }
}

/// Reported by [`ReplayPlayer`] when a step finishes playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent {
    /// The step that completed.
    pub step: usize,
    /// Whether it was the last step of the range.
    pub last: bool,
}

/// Drives a replay one step at a time.
#[derive(Debug, Clone)]
pub struct ReplayPlayer {
    replay: Replay,
    options: Options,
    colorizer: Colorizer,
    range: Range<usize>,
    current: usize,
    step_duration: Duration,
    elapsed: Duration,
    scene: Option<StepScene>,
}

impl ReplayPlayer {
    /// Player positioned at the start of the configured range.
    pub fn new(replay: Replay, options: Options) -> Result<Self, ColonyError> {
        let range = replay.step_range(&options.playback);
        let colorizer = Colorizer::from_options(&options.display);
        let step_duration = options.playback.step_duration();
        let mut player = Self {
            current: range.start,
            range,
            replay,
            options,
            colorizer,
            step_duration,
            elapsed: Duration::ZERO,
            scene: None,
        };
        player.scene = player.build_scene(player.current)?;
        log::info!(
            "playing steps {}..{} at {:?} per step",
            player.range.start,
            player.range.end,
            player.step_duration
        );
        Ok(player)
    }

    /// Scene for `step`, or `None` past the end of the range.
    fn build_scene(&self, step: usize) -> Result<Option<StepScene>, ColonyError> {
        if !self.range.contains(&step) {
            return Ok(None);
        }
        let world = self.replay.step_world(step)?;
        Ok(Some(StepScene::build(&world, &self.options, &self.colorizer)))
    }

    /// Advance time by `elapsed` and return an event if the current step
    /// finished.
    ///
    /// A zero step duration plays each step instantly. At most one step
    /// completes per call; leftover time is not carried into the next step.
    pub fn tick(
        &mut self,
        elapsed: Duration,
    ) -> Result<Option<StepEvent>, ColonyError> {
        let Some(scene) = self.scene.as_mut() else {
            return Ok(None);
        };
        self.elapsed += elapsed;
        let progress = if self.step_duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.step_duration.as_secs_f32())
                .min(1.0)
        };
        scene.advance(progress);
        if scene.is_complete() {
            return self.finish_step().map(Some);
        }
        Ok(None)
    }

    /// Move on to the following step. If its scene cannot be built the
    /// player stays on the completed step and the error is returned.
    fn finish_step(&mut self) -> Result<StepEvent, ColonyError> {
        let step = self.current;
        let next = self.build_scene(step + 1)?;
        self.current = step + 1;
        self.scene = next;
        self.elapsed = Duration::ZERO;
        let event = StepEvent {
            step,
            last: self.scene.is_none(),
        };
        log::debug!("step {step} complete");
        Ok(event)
    }

    /// Jump the current step to `progress` without waiting.
    pub fn set_progress(&mut self, progress: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.advance(progress);
            self.elapsed = self.step_duration.mul_f32(scene.progress());
        }
    }

    /// Finish the current step immediately.
    pub fn skip_step(&mut self) -> Result<Option<StepEvent>, ColonyError> {
        match self.scene.as_mut() {
            Some(scene) => {
                scene.advance(1.0);
                self.elapsed = self.step_duration;
                self.finish_step().map(Some)
            }
            None => Ok(None),
        }
    }

    /// Step currently playing, or `None` once finished.
    #[must_use]
    pub fn current_step(&self) -> Option<usize> {
        self.scene.as_ref().map(|_| self.current)
    }

    /// Scene of the step currently playing.
    #[must_use]
    pub fn scene(&self) -> Option<&StepScene> {
        self.scene.as_ref()
    }

    /// Steps selected for playback.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Whether every step in the range has played.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.scene.is_none()
    }
}
