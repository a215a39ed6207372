//! Animation system for step-to-step transitions.
//!
//! Each generator interpolates one visual quantity between the current
//! snapshot (progress 0) and the next one (progress 1). The
//! [`Scheduler`] owns every generator of a step and drives them with a
//! single progress value.

pub mod interpolation;
pub mod links;
pub mod partition;
pub mod scheduler;
pub mod transit;

pub use interpolation::{lerp_f32, lerp_vec2, ScalarTween};
pub use links::{diff_links, LinkChange, LinkDiff, LinkTween};
pub use partition::{separators, PartitionTween, Segment};
pub use scheduler::{Generator, GeneratorKind, Scheduler, Track, TrackId};
pub use transit::{endpoint_fade, marker_sides, marker_size, EdgePath, TransitTween};
