//! Centralized interpolation utilities for animation.
//!
//! Every helper here is exact at the ends of the progress domain: sampling
//! at `t <= 0` returns the start value bit-for-bit and `t >= 1` returns the
//! end value bit-for-bit. Generators rely on this so a finished step hands
//! over to the next snapshot without a visible jump.

use glam::Vec2;

use super::scheduler::Generator;

/// Linear interpolation between two f32 values, exact at both ends.
#[inline]
#[must_use]
pub fn lerp_f32(t: f32, start: f32, end: f32) -> f32 {
    if t.is_nan() || t <= 0.0 || start == end {
        start
    } else if t >= 1.0 {
        end
    } else {
        start * (1.0 - t) + end * t
    }
}

/// Linear interpolation between two points, exact at both ends.
#[inline]
#[must_use]
pub fn lerp_vec2(t: f32, start: Vec2, end: Vec2) -> Vec2 {
    Vec2::new(lerp_f32(t, start.x, end.x), lerp_f32(t, start.y, end.y))
}

/// Scalar interpolation state: start value, target value, and the value at
/// the most recent progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarTween {
    from: f32,
    to: f32,
    current: f32,
}

impl ScalarTween {
    /// Tween from `from` to `to`, currently at `from`.
    #[must_use]
    pub fn new(from: f32, to: f32) -> Self {
        Self {
            from,
            to,
            current: from,
        }
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Target value.
    #[must_use]
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Value at the most recent progress.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Value at an arbitrary progress, without changing state.
    #[must_use]
    pub fn sample(&self, t: f32) -> f32 {
        lerp_f32(t, self.from, self.to)
    }
}

impl Generator for ScalarTween {
    fn run(&mut self, progress: f32) {
        self.current = self.sample(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_f32_midpoint() {
        assert!((lerp_f32(0.25, 0.0, 100.0) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_f32_exact_endpoints() {
        let (a, b) = (0.1_f32, 0.7_f32);
        assert_eq!(lerp_f32(0.0, a, b), a);
        assert_eq!(lerp_f32(1.0, a, b), b);
        assert_eq!(lerp_f32(-2.0, a, b), a);
        assert_eq!(lerp_f32(5.0, a, b), b);
        assert_eq!(lerp_f32(f32::NAN, a, b), a);
    }

    #[test]
    fn test_lerp_f32_constant_stays_constant() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert_eq!(lerp_f32(t, 1.0, 1.0), 1.0);
        }
    }

    #[test]
    fn test_lerp_vec2() {
        let mid = lerp_vec2(0.5, Vec2::ZERO, Vec2::new(10.0, -4.0));
        assert!((mid - Vec2::new(5.0, -2.0)).length() < 1e-5);
        let end = Vec2::new(3.3, 7.1);
        assert_eq!(lerp_vec2(1.0, Vec2::ONE, end), end);
    }

    #[test]
    fn test_scalar_tween_runs() {
        let mut tween = ScalarTween::new(3.0, 11.0);
        assert_eq!(tween.value(), 3.0);
        tween.run(0.5);
        assert!((tween.value() - 7.0).abs() < 1e-5);
        tween.run(1.0);
        assert_eq!(tween.value(), 11.0);
        tween.run(1.0);
        assert_eq!(tween.value(), 11.0);
    }
}
