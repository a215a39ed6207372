//! Animation scheduler: one progress value driving every generator of a
//! step.
//!
//! The scene registers a track for every visual entity that changes between
//! the current and next snapshot, tagged with what kind of change it is.
//! The host calls [`Scheduler::advance`] with the raw step progress; the
//! scheduler eases it once and runs every track with the same eased value,
//! so all changes within a step start and finish together.

use super::interpolation::ScalarTween;
use super::links::LinkTween;
use super::partition::PartitionTween;
use super::transit::TransitTween;
use crate::util::easing::EasingFunction;

/// What a registered track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Team score counter.
    ScoreUpdate,
    /// Population ring of a node.
    NodeUpdate,
    /// Transit group moving along an edge.
    EdgeMovement,
    /// Link line growing from its origin.
    OnNodeLink,
    /// Link line retracting into its origin.
    OnNodeUnlink,
    /// Food level of a food node.
    FoodUpdate,
}

impl GeneratorKind {
    /// Every kind.
    pub const ALL: [Self; 6] = [
        Self::ScoreUpdate,
        Self::NodeUpdate,
        Self::EdgeMovement,
        Self::OnNodeLink,
        Self::OnNodeUnlink,
        Self::FoodUpdate,
    ];

    /// Snake-case name, as used in summaries.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ScoreUpdate => "score_update",
            Self::NodeUpdate => "node_update",
            Self::EdgeMovement => "edge_movement",
            Self::OnNodeLink => "on_node_link",
            Self::OnNodeUnlink => "on_node_unlink",
            Self::FoodUpdate => "food_update",
        }
    }
}

/// Something that can be sampled at a step progress in `[0, 1]`.
///
/// Implementations must be pure functions of `progress`: running at 0
/// yields the current snapshot's state and running at 1 the next one's.
pub trait Generator {
    /// Move to `progress`.
    fn run(&mut self, progress: f32);
}

/// A registered generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    /// Scalar value (score, food level).
    Scalar(ScalarTween),
    /// Population ring boundaries.
    Partition(PartitionTween),
    /// Transit group progress and opacity.
    Transit(TransitTween),
    /// Link line extension.
    Link(LinkTween),
}

impl Track {
    /// Scalar tween, if this is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarTween> {
        match self {
            Self::Scalar(tween) => Some(tween),
            _ => None,
        }
    }

    /// Partition tween, if this is one.
    #[must_use]
    pub fn as_partition(&self) -> Option<&PartitionTween> {
        match self {
            Self::Partition(tween) => Some(tween),
            _ => None,
        }
    }

    /// Transit tween, if this is one.
    #[must_use]
    pub fn as_transit(&self) -> Option<&TransitTween> {
        match self {
            Self::Transit(tween) => Some(tween),
            _ => None,
        }
    }

    /// Link tween, if this is one.
    #[must_use]
    pub fn as_link(&self) -> Option<&LinkTween> {
        match self {
            Self::Link(tween) => Some(tween),
            _ => None,
        }
    }
}

impl Generator for Track {
    fn run(&mut self, progress: f32) {
        match self {
            Self::Scalar(tween) => tween.run(progress),
            Self::Partition(tween) => tween.run(progress),
            Self::Transit(tween) => tween.run(progress),
            Self::Link(tween) => tween.run(progress),
        }
    }
}

impl From<ScalarTween> for Track {
    fn from(tween: ScalarTween) -> Self {
        Self::Scalar(tween)
    }
}

impl From<PartitionTween> for Track {
    fn from(tween: PartitionTween) -> Self {
        Self::Partition(tween)
    }
}

impl From<TransitTween> for Track {
    fn from(tween: TransitTween) -> Self {
        Self::Transit(tween)
    }
}

impl From<LinkTween> for Track {
    fn from(tween: LinkTween) -> Self {
        Self::Link(tween)
    }
}

/// Handle to a registered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(usize);

/// Registry of the tracks for one step.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tracks: Vec<(GeneratorKind, Track)>,
    easing: EasingFunction,
    progress: f32,
}

impl Scheduler {
    /// Empty scheduler applying `easing` to the raw step progress.
    #[must_use]
    pub fn new(easing: EasingFunction) -> Self {
        Self {
            tracks: Vec::new(),
            easing,
            progress: 0.0,
        }
    }

    /// Register a track. It is immediately run at the current progress.
    pub fn register(
        &mut self,
        kind: GeneratorKind,
        track: impl Into<Track>,
    ) -> TrackId {
        let mut track = track.into();
        track.run(self.easing.evaluate(self.progress));
        self.tracks.push((kind, track));
        TrackId(self.tracks.len() - 1)
    }

    /// Run every track at `progress` (clamped to `[0, 1]`, NaN as 0).
    pub fn advance(&mut self, progress: f32) {
        let raw = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.progress = raw;
        let eased = self.easing.evaluate(raw);
        log::trace!("advancing {} tracks to {raw:.3}", self.tracks.len());
        for (_, track) in &mut self.tracks {
            track.run(eased);
        }
    }

    /// Raw progress of the last [`advance`](Self::advance).
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the step has played through.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Registered track by handle.
    #[must_use]
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id.0).map(|(_, track)| track)
    }

    /// Kind of a registered track.
    #[must_use]
    pub fn kind(&self, id: TrackId) -> Option<GeneratorKind> {
        self.tracks.get(id.0).map(|(kind, _)| *kind)
    }

    /// Kinds of every registered track, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = GeneratorKind> + '_ {
        self.tracks.iter().map(|(kind, _)| *kind)
    }

    /// Number of tracks of `kind`.
    #[must_use]
    pub fn count(&self, kind: GeneratorKind) -> usize {
        self.kinds().filter(|k| *k == kind).count()
    }

    /// Number of registered tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether nothing changes this step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
