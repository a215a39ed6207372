//! Link lines: which destinations a group points at, and how those lines
//! grow or retract between steps.

use rustc_hash::FxHashSet;

use super::interpolation::lerp_f32;
use super::scheduler::Generator;
use crate::world::NodeId;

/// Classification of a group's link targets across one step.
///
/// Every target in either list lands in exactly one bucket. Each bucket
/// keeps the order targets first appear in their source list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDiff {
    /// Targets only in the next step.
    pub appeared: Vec<NodeId>,
    /// Targets only in the current step.
    pub disappeared: Vec<NodeId>,
    /// Targets in both.
    pub unchanged: Vec<NodeId>,
}

impl LinkDiff {
    /// Whether no line grows or retracts.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.appeared.is_empty() && self.disappeared.is_empty()
    }
}

/// Diff the current and next link lists. Duplicates count once.
#[must_use]
pub fn diff_links(current: &[NodeId], next: &[NodeId]) -> LinkDiff {
    let current_set: FxHashSet<NodeId> = current.iter().copied().collect();
    let next_set: FxHashSet<NodeId> = next.iter().copied().collect();

    let mut diff = LinkDiff::default();
    let mut seen = FxHashSet::default();
    for &target in current {
        if !seen.insert(target) {
            continue;
        }
        if next_set.contains(&target) {
            diff.unchanged.push(target);
        } else {
            diff.disappeared.push(target);
        }
    }
    for &target in next {
        if seen.insert(target) && !current_set.contains(&target) {
            diff.appeared.push(target);
        }
    }
    diff
}

/// How a link line changes this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// Grows from the origin to full length.
    Appear,
    /// Retracts from full length into the origin.
    Disappear,
}

/// Fraction of a link line drawn, from 0 (collapsed on its origin) to 1
/// (touching its target).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkTween {
    change: LinkChange,
    progress: f32,
    extension: f32,
}

impl LinkTween {
    /// Line that grows this step.
    #[must_use]
    pub fn appear() -> Self {
        Self {
            change: LinkChange::Appear,
            progress: 0.0,
            extension: 0.0,
        }
    }

    /// Line that retracts this step.
    #[must_use]
    pub fn disappear() -> Self {
        Self {
            change: LinkChange::Disappear,
            progress: 0.0,
            extension: 1.0,
        }
    }

    /// Direction of change.
    #[must_use]
    pub fn change(&self) -> LinkChange {
        self.change
    }

    /// Drawn fraction at the most recent progress.
    #[must_use]
    pub fn extension(&self) -> f32 {
        self.extension
    }

    /// Whether a retracting line has finished and can be dropped.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.change == LinkChange::Disappear && self.progress >= 1.0
    }
}

impl Generator for LinkTween {
    fn run(&mut self, progress: f32) {
        self.progress = progress;
        self.extension = match self.change {
            LinkChange::Appear => lerp_f32(progress, 0.0, 1.0),
            LinkChange::Disappear => lerp_f32(progress, 1.0, 0.0),
        };
    }
}
