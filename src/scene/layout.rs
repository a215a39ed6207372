//! World-to-canvas mapping.
//!
//! Canvas coordinates are centered: the origin is the middle of the canvas.
//! The world's bounding box is stretched independently on each axis to fill
//! the canvas (minus a margin), and node size follows the tighter axis.

use glam::Vec2;

use crate::options::GeometryOptions;

/// Fitted transform from world positions to canvas positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    scale: Vec2,
    translate: Vec2,
    node_size: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scale: Vec2::ONE,
            translate: Vec2::ZERO,
            node_size: 10.0,
        }
    }
}

impl Layout {
    /// Fit `positions` into the canvas described by `geometry`.
    ///
    /// A degenerate axis (all nodes share a coordinate) is treated as one
    /// world unit wide. No positions yields the default layout.
    pub fn fit(
        positions: impl IntoIterator<Item = Vec2>,
        geometry: &GeometryOptions,
    ) -> Self {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut sum = Vec2::ZERO;
        let mut count = 0_usize;
        for p in positions {
            min = min.min(p);
            max = max.max(p);
            sum += p;
            count += 1;
        }
        if count == 0 {
            return Self::default();
        }

        let half = Vec2::new(geometry.canvas_width, geometry.canvas_height) * 0.5
            - Vec2::splat(geometry.margin);
        let half = half.max(Vec2::ONE);
        let extent = max - min;
        let extent = Vec2::new(
            if extent.x > f32::EPSILON { extent.x } else { 1.0 },
            if extent.y > f32::EPSILON { extent.y } else { 1.0 },
        );
        let scale = half / extent;
        let mean = sum / count as f32;

        Self {
            scale,
            translate: -mean * scale,
            node_size: geometry.node_size_factor * scale.min_element(),
        }
    }

    /// Canvas position of a world position.
    #[must_use]
    pub fn to_canvas(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.translate
    }

    /// Per-axis world-to-canvas scale.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Node disc diameter in canvas units.
    #[must_use]
    pub fn node_size(&self) -> f32 {
        self.node_size
    }
}
