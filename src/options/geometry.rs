use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas size and shape sizing factors for the scene builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
pub struct GeometryOptions {
    /// Canvas width in pixels.
    #[schemars(title = "Canvas Width", range(min = 1.0))]
    pub canvas_width: f32,
    /// Canvas height in pixels.
    #[schemars(title = "Canvas Height", range(min = 1.0))]
    pub canvas_height: f32,
    /// Margin kept between the outermost nodes and the canvas half-extent.
    #[schemars(title = "Margin")]
    pub margin: f32,
    /// Node diameter as a multiple of the world-to-canvas scale.
    #[schemars(title = "Node Size Factor")]
    pub node_size_factor: f32,
    /// Population ring diameter relative to the node disc.
    #[schemars(title = "Ring Scale")]
    pub ring_scale: f32,
    /// Edge stroke width relative to node size.
    #[schemars(title = "Edge Width Factor")]
    pub edge_width_factor: f32,
    /// Largest transit marker size relative to node size.
    #[schemars(title = "Marker Size Factor")]
    pub marker_size_factor: f32,
    /// Saturation rate `k` of the marker size curve `1 - e^(-k·qt)`.
    #[schemars(title = "Marker Saturation", range(min = 0.0))]
    pub marker_saturation: f32,
    /// Stroke width of link (construction) lines.
    #[schemars(title = "Link Width")]
    pub link_width: f32,
    /// Dash pattern of link lines (dash, gap).
    #[schemars(skip)]
    pub link_dash: [f32; 2],
    /// Node outline stroke width.
    #[schemars(skip)]
    pub node_stroke_width: f32,
    /// Population segments narrower than this (degrees) at both ends of a
    /// transition are drawn fully transparent.
    #[schemars(title = "Min Segment Degrees", range(min = 0.0, max = 360.0))]
    pub min_segment_degrees: f32,
    /// Fraction of the step over which an arriving/departing transit marker
    /// fades out.
    #[schemars(title = "Endpoint Fade Window", range(min = 0.0, max = 1.0))]
    pub endpoint_fade_window: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            canvas_width: 1920.0,
            canvas_height: 1080.0,
            margin: 20.0,
            node_size_factor: 10.0,
            ring_scale: 1.4,
            edge_width_factor: 0.2,
            marker_size_factor: 0.5,
            marker_saturation: 0.2,
            link_width: 4.0,
            link_dash: [20.0, 10.0],
            node_stroke_width: 4.0,
            min_segment_degrees: 3.0,
            endpoint_fade_window: 0.05,
        }
    }
}
