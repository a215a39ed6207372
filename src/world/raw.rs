//! Raw snapshot records as produced by the simulation.
//!
//! These structs accept every historical field spelling: camelCase and
//! snake_case names, the localized node kinds (`VIDE`/`EAU`/`NOURRITURE`/
//! `REINE`), single `link` as well as multi-target `links`, and edge
//! endpoints given either as `ids: [a, b]` or as `id_1`/`id_2`. They carry
//! no invariants; [`WorldSnapshot::build`](super::WorldSnapshot::build)
//! normalizes them.

use serde::{Deserialize, Serialize};

use super::{NodeId, TeamId};

fn default_color() -> String {
    "white".to_owned()
}

/// One simulation step as found in the replay file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    /// Teams in load order.
    #[serde(default)]
    pub teams: Vec<RawTeam>,
    /// Map nodes.
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    /// Edges between nodes.
    #[serde(default)]
    pub edges: Vec<RawEdge>,
    /// Normalization constant for food-stock rendering.
    #[serde(default, alias = "maxFood", alias = "maxfood")]
    pub max_food: f32,
}

/// Team record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTeam {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// CSS-style color string.
    #[serde(default = "default_color")]
    pub color: String,
    /// Score at this step.
    #[serde(default)]
    pub score: i64,
    /// Score at the following step, when the producer inlines it.
    #[serde(
        default,
        alias = "nextScore",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_score: Option<i64>,
}

/// Node kind spellings, canonical and localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawNodeKind {
    /// Plain node.
    #[serde(rename = "EMPTY", alias = "VIDE")]
    Empty,
    /// Water source.
    #[serde(rename = "WATER", alias = "EAU")]
    Water,
    /// Food stock.
    #[serde(rename = "FOOD", alias = "NOURRITURE")]
    Food,
    /// Team queen.
    #[serde(rename = "QUEEN", alias = "REINE")]
    Queen,
}

/// Inline next-state block attached to a node by the producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNodeAnim {
    /// Food stock at the following step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<f32>,
    /// Ant groups at the following step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ants: Option<Vec<RawAntGroup>>,
}

/// Node record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    /// Node identifier.
    pub id: NodeId,
    /// World x coordinate.
    pub x: f32,
    /// World y coordinate.
    pub y: f32,
    /// Node kind; missing means empty.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RawNodeKind>,
    /// Food stock (meaningful for food nodes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<f32>,
    /// Owning team (meaningful for queen nodes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamId>,
    /// Pheromone level, fed to the colorizer.
    #[serde(default)]
    pub pheromone: f32,
    /// Resident ant groups.
    #[serde(default)]
    pub ants: Vec<RawAntGroup>,
    /// Resident ant groups at the following step.
    #[serde(
        default,
        alias = "nextAnts",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_ants: Option<Vec<RawAntGroup>>,
    /// Food stock at the following step.
    #[serde(
        default,
        alias = "nextFood",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_food: Option<f32>,
    /// Legacy inline next-state block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anim: Option<RawNodeAnim>,
}

/// Ant group resident on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAntGroup {
    /// Owning team.
    pub team: TeamId,
    /// Number of ants.
    #[serde(default)]
    pub qt: f32,
    /// Legacy single construction target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<NodeId>,
    /// Construction targets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NodeId>,
}

/// Inline next-state block attached to a transit group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransitAnim {
    /// Position along the edge at the following step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Legacy single construction target at the following step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<NodeId>,
    /// Construction targets at the following step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<NodeId>>,
}

/// Ant group travelling along an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransitGroup {
    /// Owning team.
    pub team: TeamId,
    /// Number of ants.
    #[serde(default)]
    pub qt: f32,
    /// Legacy single construction target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<NodeId>,
    /// Construction targets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NodeId>,
    /// Position along the edge, 0 at the lower node id.
    #[serde(default)]
    pub progress: f32,
    /// Position at the following step.
    #[serde(
        default,
        alias = "nextProgress",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_progress: Option<f32>,
    /// Construction targets at the following step.
    #[serde(
        default,
        alias = "nextLinks",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_links: Option<Vec<NodeId>>,
    /// Legacy inline next-state block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anim: Option<RawTransitAnim>,
}

/// Edge record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    /// Endpoint pair (map-keyed schema).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<NodeId>>,
    /// First endpoint (flat-list schema).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_1: Option<NodeId>,
    /// Second endpoint (flat-list schema).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_2: Option<NodeId>,
    /// Structural integrity; missing means destroyed.
    #[serde(
        default,
        alias = "lifeRatio",
        skip_serializing_if = "Option::is_none"
    )]
    pub life_ratio: Option<f32>,
    /// Ant groups in transit.
    #[serde(default)]
    pub groups: Vec<RawTransitGroup>,
}
