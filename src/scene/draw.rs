//! Plain draw descriptions handed to a renderer.
//!
//! Positions are in centered canvas coordinates and angles in degrees,
//! measured from the positive x axis. Commands are listed in painter's
//! order: later commands draw over earlier ones.

use glam::Vec2;
use serde::Serialize;

use crate::util::color::Color;

/// Outline of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in canvas units.
    pub width: f32,
}

/// One primitive for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum DrawCommand {
    /// Circular arc or pie wedge. A full circle spans 0..360.
    Arc {
        /// Circle center.
        center: Vec2,
        /// Circle diameter.
        diameter: f32,
        /// Start angle in degrees.
        start_angle: f32,
        /// End angle in degrees.
        end_angle: f32,
        /// Fill color; `None` draws only the outline.
        fill: Option<Color>,
        /// Outline; `None` draws only the fill.
        stroke: Option<Stroke>,
        /// Overall opacity.
        opacity: f32,
    },
    /// Regular polygon.
    Polygon {
        /// Polygon center.
        center: Vec2,
        /// Number of sides.
        sides: u32,
        /// Circumscribed diameter.
        size: f32,
        /// Fill color.
        fill: Color,
        /// Overall opacity.
        opacity: f32,
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
        /// Dash pattern (dash, gap); `None` for a solid line.
        dash: Option<[f32; 2]>,
    },
    /// Text label.
    Text {
        /// Anchor position.
        position: Vec2,
        /// Alignment offset in `[-1, 1]` per axis relative to the text box.
        offset: Vec2,
        /// Label contents.
        text: String,
        /// Fill color.
        color: Color,
    },
}

impl DrawCommand {
    /// Short name of the primitive.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Arc { .. } => "arc",
            Self::Polygon { .. } => "polygon",
            Self::Line { .. } => "line",
            Self::Text { .. } => "text",
        }
    }

    /// Whether the command would draw nothing visible.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        match self {
            Self::Arc {
                diameter, opacity, ..
            } => *diameter <= 0.0 || *opacity <= 0.0,
            Self::Polygon { size, opacity, .. } => *size <= 0.0 || *opacity <= 0.0,
            Self::Line { from, to, width, .. } => from == to || *width <= 0.0,
            Self::Text { text, .. } => text.is_empty(),
        }
    }
}
