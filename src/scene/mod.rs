//! Scene: what one simulation step looks like on the canvas.
//!
//! A [`StepScene`] is built from a paired snapshot, advanced by the host
//! with a step progress, and turned into a flat list of [`DrawCommand`]s
//! for whatever renderer sits on the other side.

mod draw;
mod layout;
mod legend;
mod step;

pub use draw::{DrawCommand, Stroke};
pub use layout::Layout;
pub use legend::legend_anchors;
pub use step::{LinkState, MarkerState, StepScene};
