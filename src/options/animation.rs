use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Interpolation settings shared by every generator in a step.
pub struct AnimationOptions {
    /// Curve applied to the host's raw progress before generators run.
    /// Linear keeps every tween linear in progress.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}
