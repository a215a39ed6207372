//! Population partition of a node's ring by team.
//!
//! A node's ants are drawn as a ring of wedges, one per team, in the
//! snapshot's team order. Wedge `k` spans `[b_k, b_{k+1}]` of the full turn
//! where `b_k` is the share of ants belonging to teams before `k`.
//!
//! An all-empty node has no meaningful shares. It is collapsed so that the
//! **last** team's wedge spans the whole turn (`[0, …, 0, 1]`) at opacity 0,
//! which gives the first populated state a full-width wedge to shrink from
//! instead of every wedge starting at zero width.

use super::interpolation::lerp_f32;
use super::scheduler::Generator;

/// Cumulative boundaries `b_0..=b_n` for quantities in team order.
///
/// Always returns `n + 1` values with `b_0 = 0`, `b_n = 1` and
/// `b_k <= b_{k+1}`; never NaN. Negative and non-finite quantities count
/// as zero. No teams yields `[0, 1]`.
#[must_use]
pub fn separators(quantities: &[f32]) -> Vec<f32> {
    let clean = |q: f32| if q.is_finite() { q.max(0.0) } else { 0.0 };
    let total: f32 = quantities.iter().copied().map(clean).sum();

    let n = quantities.len();
    if n == 0 {
        return vec![0.0, 1.0];
    }

    let mut bounds = Vec::with_capacity(n + 1);
    if total <= 0.0 || !total.is_finite() {
        bounds.resize(n, 0.0);
        bounds.push(1.0);
        return bounds;
    }

    let mut running = 0.0_f32;
    bounds.push(0.0);
    for &q in &quantities[..n - 1] {
        running += clean(q);
        bounds.push((running / total).clamp(0.0, 1.0));
    }
    bounds.push(1.0);
    enforce_monotone(&mut bounds);
    bounds
}

/// Pin the ends to 0 and 1 and make the sequence non-decreasing.
fn enforce_monotone(bounds: &mut [f32]) {
    let last = bounds.len() - 1;
    let mut floor = 0.0_f32;
    for (k, b) in bounds.iter_mut().enumerate() {
        *b = if k == 0 {
            0.0
        } else if k == last {
            1.0
        } else {
            b.clamp(floor, 1.0)
        };
        floor = *b;
    }
}

/// One team's wedge at the current progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start of the wedge as a fraction of a full turn.
    pub start: f32,
    /// End of the wedge as a fraction of a full turn.
    pub end: f32,
    /// Blend from the wedge's visibility at the start of the step to its
    /// visibility at the target: 0 for a sliver or an empty wedge, 1 for a
    /// drawn one.
    pub opacity: f32,
}

impl Segment {
    /// Wedge width as a fraction of a full turn.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.end - self.start
    }

    /// Start angle in degrees.
    #[must_use]
    pub fn start_degrees(&self) -> f32 {
        self.start * 360.0
    }

    /// End angle in degrees.
    #[must_use]
    pub fn end_degrees(&self) -> f32 {
        self.end * 360.0
    }
}

/// Per-wedge visibility of a ring: 1 when wedge `k` holds ants and is at
/// least `threshold` (fraction of a turn) wide.
fn visibility(bounds: &[f32], quantities: &[f32], threshold: f32) -> Vec<f32> {
    (0..bounds.len().saturating_sub(1))
        .map(|k| {
            let populated = quantities.get(k).is_some_and(|&q| q > 0.0);
            if populated && bounds[k + 1] - bounds[k] >= threshold {
                1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Interpolates every boundary of a node's ring in parallel.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTween {
    from: Vec<f32>,
    to: Vec<f32>,
    current: Vec<f32>,
    from_opacity: Vec<f32>,
    to_opacity: Vec<f32>,
    progress: f32,
}

impl PartitionTween {
    /// Transition between two quantity vectors in the same team order.
    ///
    /// `min_segment_degrees` is the visibility threshold. Each wedge fades
    /// from its visibility at the start to its visibility at the target, so
    /// the opacity at progress 1 is the one the following step starts from.
    /// If the two vectors disagree in length the ring snaps to the target.
    #[must_use]
    pub fn new(from: &[f32], to: &[f32], min_segment_degrees: f32) -> Self {
        let threshold = min_segment_degrees.max(0.0) / 360.0;
        let to_bounds = separators(to);
        let to_opacity = visibility(&to_bounds, to, threshold);
        let (from_bounds, from_opacity) = if from.len() == to.len() {
            let bounds = separators(from);
            let opacity = visibility(&bounds, from, threshold);
            (bounds, opacity)
        } else {
            log::debug!(
                "partition team count changed ({} -> {}), snapping",
                from.len(),
                to.len()
            );
            (to_bounds.clone(), to_opacity.clone())
        };

        Self {
            current: from_bounds.clone(),
            from: from_bounds,
            to: to_bounds,
            from_opacity,
            to_opacity,
            progress: 0.0,
        }
    }

    /// Ring that does not change this step.
    #[must_use]
    pub fn fixed(quantities: &[f32], min_segment_degrees: f32) -> Self {
        Self::new(quantities, quantities, min_segment_degrees)
    }

    /// Boundaries at the start of the step.
    #[must_use]
    pub fn from(&self) -> &[f32] {
        &self.from
    }

    /// Boundaries at the end of the step.
    #[must_use]
    pub fn to(&self) -> &[f32] {
        &self.to
    }

    /// Whether the ring (boundaries or wedge visibility) differs between
    /// start and target.
    #[must_use]
    pub fn changes(&self) -> bool {
        self.from != self.to || self.from_opacity != self.to_opacity
    }

    /// Boundaries at the most recent progress.
    #[must_use]
    pub fn boundaries(&self) -> &[f32] {
        &self.current
    }

    /// Boundaries at an arbitrary progress, without changing state.
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec<f32> {
        if t.is_nan() || t <= 0.0 {
            return self.from.clone();
        }
        if t >= 1.0 {
            return self.to.clone();
        }
        let mut bounds: Vec<f32> = self
            .from
            .iter()
            .zip(&self.to)
            .map(|(&a, &b)| lerp_f32(t, a, b))
            .collect();
        enforce_monotone(&mut bounds);
        bounds
    }

    /// Wedge `k` at the most recent progress.
    #[must_use]
    pub fn segment(&self, k: usize) -> Option<Segment> {
        let start = *self.current.get(k)?;
        let end = *self.current.get(k + 1)?;
        let from = self.from_opacity.get(k).copied().unwrap_or(0.0);
        let to = self.to_opacity.get(k).copied().unwrap_or(0.0);
        Some(Segment {
            start,
            end,
            opacity: lerp_f32(self.progress, from, to),
        })
    }

    /// All wedges at the most recent progress, in team order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        (0..self.current.len().saturating_sub(1))
            .filter_map(|k| self.segment(k))
            .collect()
    }
}

impl Generator for PartitionTween {
    fn run(&mut self, progress: f32) {
        self.current = self.sample(progress);
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }
}
