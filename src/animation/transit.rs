//! Ant groups moving along edges.
//!
//! A transit group's progress is a fraction of its edge's drawn length. The
//! drawn path runs between the two node rims rather than their centers, so
//! a marker at progress 0 sits on node A's rim and at progress 1 on node
//! B's. Groups that are about to arrive (target exactly 0 or 1) fade out
//! over the last slice of the step instead of popping.

use glam::Vec2;

use super::interpolation::{lerp_f32, lerp_vec2};
use super::scheduler::Generator;
use crate::util::easing::EasingFunction;

/// Straight path between two node rims.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePath {
    start: Vec2,
    end: Vec2,
}

impl EdgePath {
    /// Path from `a` to `b`, pulled in by `radius` at each end.
    ///
    /// Nodes closer than `2 * radius` collapse the path onto their
    /// midpoint.
    #[must_use]
    pub fn new(a: Vec2, b: Vec2, radius: f32) -> Self {
        let delta = b - a;
        let length = delta.length();
        let radius = radius.max(0.0);
        if !length.is_finite() || length <= 2.0 * radius || length == 0.0 {
            let mid = (a + b) * 0.5;
            return Self { start: mid, end: mid };
        }
        let dir = delta / length;
        Self {
            start: a + dir * radius,
            end: b - dir * radius,
        }
    }

    /// Rim point on node A's side.
    #[must_use]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Rim point on node B's side.
    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Drawn length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Point at `progress` of the drawn length.
    #[must_use]
    pub fn point_at(&self, progress: f32) -> Vec2 {
        lerp_vec2(progress, self.start, self.end)
    }
}

/// Marker size for a group of `quantity` ants.
///
/// Saturates towards `base` as the group grows; `saturation` controls how
/// quickly. Empty groups have size 0.
#[must_use]
pub fn marker_size(quantity: f32, base: f32, saturation: f32) -> f32 {
    if !quantity.is_finite() || quantity <= 0.0 {
        return 0.0;
    }
    base * (1.0 - (-saturation * quantity).exp())
}

/// Polygon side count for a group of `quantity` ants: one more side per
/// order of magnitude, never fewer than 3.
#[must_use]
pub fn marker_sides(quantity: f32) -> u32 {
    if !quantity.is_finite() || quantity <= 1.0 {
        return 3;
    }
    let extra = quantity.log10().round().max(0.0);
    3 + extra as u32
}

/// Opacity near the end of a step for a group reaching an endpoint.
///
/// 1 until the final `window` of progress, then eases to exactly 0 at
/// progress 1.
#[must_use]
pub fn endpoint_fade(progress: f32, window: f32) -> f32 {
    if progress.is_nan() || progress < 1.0 - window.max(0.0) {
        return 1.0;
    }
    if progress >= 1.0 {
        return 0.0;
    }
    let local = (progress - (1.0 - window)) / window;
    1.0 - EasingFunction::QuadraticIn.evaluate(local)
}

/// Progress and opacity of one transit group across a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitTween {
    from: f32,
    to: f32,
    fades: bool,
    fade_window: f32,
    progress: f32,
    opacity: f32,
}

impl TransitTween {
    /// Group moving from `from` to `to` (fractions of the edge).
    ///
    /// With no target the group holds still. A group whose target is
    /// exactly 0 or 1 (and that is not already there) fades out over the
    /// final `fade_window` of the step.
    #[must_use]
    pub fn new(from: f32, to: Option<f32>, fade_window: f32) -> Self {
        let to = to.unwrap_or(from);
        let arriving = to == 0.0 || to == 1.0;
        Self {
            from,
            to,
            fades: arriving && to != from,
            fade_window,
            progress: from,
            opacity: 1.0,
        }
    }

    /// Group that does not move this step.
    #[must_use]
    pub fn fixed(progress: f32) -> Self {
        Self::new(progress, None, 0.0)
    }

    /// Whether the group's position differs between start and target.
    #[must_use]
    pub fn changes(&self) -> bool {
        self.from != self.to || self.fades
    }

    /// Whether the group fades out this step.
    #[must_use]
    pub fn fades(&self) -> bool {
        self.fades
    }

    /// Start progress.
    #[must_use]
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Target progress.
    #[must_use]
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Edge progress at the most recent step progress.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Opacity at the most recent step progress.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Marker position on `path` at the most recent step progress.
    #[must_use]
    pub fn position(&self, path: &EdgePath) -> Vec2 {
        path.point_at(self.progress)
    }
}

impl Generator for TransitTween {
    fn run(&mut self, progress: f32) {
        self.progress = lerp_f32(progress, self.from, self.to);
        self.opacity = if self.fades {
            endpoint_fade(progress, self.fade_window)
        } else {
            1.0
        };
    }
}
