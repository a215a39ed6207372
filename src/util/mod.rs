//! Shared utilities: easing curves and colors.

pub mod color;
pub mod easing;
