//! Normalized world entities and snapshot construction.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::edges::{Edge, EdgeKey, EdgeSet};
use super::raw::{
    RawAntGroup, RawEdge, RawNode, RawNodeKind, RawSnapshot, RawTeam,
    RawTransitGroup,
};
use super::{NodeId, TeamId};
use crate::error::ColonyError;
use crate::util::color::Color;

/// Clamp into [0, 1]; NaN becomes 0.
#[must_use]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp to a finite non-negative value; NaN and infinities become 0.
#[must_use]
pub(crate) fn clamp_quantity(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Ordered, de-duplicated link targets from the legacy single `link` and
/// the multi-target `links` list.
fn merge_links(link: Option<NodeId>, links: &[NodeId]) -> Vec<NodeId> {
    let mut merged = Vec::with_capacity(links.len() + 1);
    for target in link.into_iter().chain(links.iter().copied()) {
        if !merged.contains(&target) {
            merged.push(target);
        }
    }
    merged
}

/// A competing colony.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Parsed team color (white when unrecognized).
    pub color: Color,
    /// Color exactly as given in the snapshot.
    pub color_text: String,
    /// Score at this step.
    pub score: u64,
    /// Score at the following step.
    pub next_score: Option<u64>,
}

impl Team {
    fn from_raw(raw: &RawTeam) -> Self {
        let color = Color::parse(&raw.color).unwrap_or_else(|| {
            log::debug!(
                "team {} has unrecognized color '{}', using white",
                raw.id,
                raw.color
            );
            Color::WHITE
        });
        Self {
            id: raw.id,
            name: raw.name.clone(),
            color,
            color_text: raw.color.clone(),
            score: raw.score.max(0) as u64,
            next_score: raw.next_score.map(|s| s.max(0) as u64),
        }
    }
}

/// What a node is, one rendering rule per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Plain node.
    #[default]
    Empty,
    /// Water source.
    Water,
    /// Food stock.
    Food,
    /// A team's queen.
    Queen,
}

impl From<RawNodeKind> for NodeKind {
    fn from(raw: RawNodeKind) -> Self {
        match raw {
            RawNodeKind::Empty => Self::Empty,
            RawNodeKind::Water => Self::Water,
            RawNodeKind::Food => Self::Food,
            RawNodeKind::Queen => Self::Queen,
        }
    }
}

impl From<NodeKind> for RawNodeKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Empty => Self::Empty,
            NodeKind::Water => Self::Water,
            NodeKind::Food => Self::Food,
            NodeKind::Queen => Self::Queen,
        }
    }
}

/// Ants of one team resident on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct AntGroup {
    /// Owning team.
    pub team: TeamId,
    /// Number of ants, never negative.
    pub quantity: f32,
    /// Nodes this group is building a connection toward.
    pub links: Vec<NodeId>,
}

impl AntGroup {
    fn from_raw(raw: &RawAntGroup) -> Self {
        Self {
            team: raw.team,
            quantity: clamp_quantity(raw.qt),
            links: merge_links(raw.link, &raw.links),
        }
    }

    fn to_raw(&self) -> RawAntGroup {
        RawAntGroup {
            team: self.team,
            qt: self.quantity,
            link: None,
            links: self.links.clone(),
        }
    }
}

/// One group per team; a later record for the same team replaces the
/// earlier one but keeps its position.
fn groups_by_team(raw: &[RawAntGroup]) -> Vec<AntGroup> {
    let mut groups: Vec<AntGroup> = Vec::with_capacity(raw.len());
    for group in raw.iter().map(AntGroup::from_raw) {
        match groups.iter_mut().find(|g| g.team == group.team) {
            Some(slot) => *slot = group,
            None => groups.push(group),
        }
    }
    groups
}

/// Ant group travelling along an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitGroup {
    /// Owning team.
    pub team: TeamId,
    /// Number of ants, never negative.
    pub quantity: f32,
    /// Position along the edge in [0, 1], 0 at [`EdgeKey::low`].
    pub progress: f32,
    /// Position at the following step, clamped to [0, 1].
    pub next_progress: Option<f32>,
    /// Construction targets.
    pub links: Vec<NodeId>,
    /// Construction targets at the following step.
    pub next_links: Option<Vec<NodeId>>,
}

impl TransitGroup {
    fn from_raw(raw: &RawTransitGroup) -> Self {
        let anim = raw.anim.as_ref();
        let next_progress = raw
            .next_progress
            .or_else(|| anim.and_then(|a| a.progress))
            .map(clamp_unit);
        let next_links = raw.next_links.clone().or_else(|| {
            anim.and_then(|a| {
                (a.links.is_some() || a.link.is_some()).then(|| {
                    merge_links(a.link, a.links.as_deref().unwrap_or_default())
                })
            })
        });
        Self {
            team: raw.team,
            quantity: clamp_quantity(raw.qt),
            progress: clamp_unit(raw.progress),
            next_progress,
            links: merge_links(raw.link, &raw.links),
            next_links: next_links.map(|links| merge_links(None, &links)),
        }
    }

    fn to_raw(&self) -> RawTransitGroup {
        RawTransitGroup {
            team: self.team,
            qt: self.quantity,
            link: None,
            links: self.links.clone(),
            progress: clamp_unit(self.progress),
            next_progress: self.next_progress.map(clamp_unit),
            next_links: self.next_links.clone(),
            anim: None,
        }
    }
}

/// A map node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node identifier, unique within a snapshot.
    pub id: NodeId,
    /// World-space position.
    pub position: Vec2,
    /// Node kind.
    pub kind: NodeKind,
    /// Food stock; 0 unless the node is a food node.
    pub food: f32,
    /// Owning team; 0 unless the node is a queen.
    pub owner_team: TeamId,
    /// Pheromone level.
    pub pheromone: f32,
    /// Resident ants, one group per team.
    pub ants: Vec<AntGroup>,
    /// Resident ants at the following step.
    pub next_ants: Option<Vec<AntGroup>>,
    /// Food stock at the following step (food nodes only).
    pub next_food: Option<f32>,
}

impl Node {
    fn from_raw(raw: &RawNode) -> Result<Self, ColonyError> {
        if !(raw.x.is_finite() && raw.y.is_finite()) {
            return Err(ColonyError::malformed(format!(
                "node {} has a non-finite position",
                raw.id
            )));
        }
        let kind = raw.kind.map(NodeKind::from).unwrap_or_default();
        let is_food = kind == NodeKind::Food;
        let anim = raw.anim.as_ref();
        let next_ants = raw
            .next_ants
            .as_deref()
            .or_else(|| anim.and_then(|a| a.ants.as_deref()))
            .map(groups_by_team);
        let next_food = raw
            .next_food
            .or_else(|| anim.and_then(|a| a.food))
            .filter(|_| is_food)
            .map(clamp_quantity);

        Ok(Self {
            id: raw.id,
            position: Vec2::new(raw.x, raw.y),
            kind,
            food: if is_food {
                clamp_quantity(raw.food.unwrap_or(0.0))
            } else {
                0.0
            },
            owner_team: if kind == NodeKind::Queen {
                raw.team.unwrap_or(0)
            } else {
                0
            },
            pheromone: if raw.pheromone.is_finite() {
                raw.pheromone
            } else {
                0.0
            },
            ants: groups_by_team(&raw.ants),
            next_ants,
            next_food,
        })
    }

    fn to_raw(&self) -> RawNode {
        RawNode {
            id: self.id,
            x: self.position.x,
            y: self.position.y,
            kind: Some(self.kind.into()),
            food: (self.kind == NodeKind::Food).then_some(self.food),
            team: (self.kind == NodeKind::Queen).then_some(self.owner_team),
            pheromone: self.pheromone,
            ants: self.ants.iter().map(AntGroup::to_raw).collect(),
            next_ants: self
                .next_ants
                .as_ref()
                .map(|groups| groups.iter().map(AntGroup::to_raw).collect()),
            next_food: self.next_food,
            anim: None,
        }
    }

    /// Resident group of `team`, if any.
    #[must_use]
    pub fn group(&self, team: TeamId) -> Option<&AntGroup> {
        self.ants.iter().find(|g| g.team == team)
    }

    /// Resident group of `team` at the following step, if known.
    #[must_use]
    pub fn next_group(&self, team: TeamId) -> Option<&AntGroup> {
        self.next_ants.as_ref()?.iter().find(|g| g.team == team)
    }

    /// Quantity per team, in the given team order (missing teams count 0).
    #[must_use]
    pub fn quantities(&self, teams: &[Team]) -> Vec<f32> {
        quantities_for(&self.ants, teams)
    }

    /// Quantity per team at the following step, when known.
    #[must_use]
    pub fn next_quantities(&self, teams: &[Team]) -> Option<Vec<f32>> {
        self.next_ants
            .as_deref()
            .map(|groups| quantities_for(groups, teams))
    }
}

fn quantities_for(groups: &[AntGroup], teams: &[Team]) -> Vec<f32> {
    teams
        .iter()
        .map(|team| {
            groups
                .iter()
                .find(|g| g.team == team.id)
                .map_or(0.0, |g| g.quantity)
        })
        .collect()
}

/// Where an ant group lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupLocation {
    /// Resident on a node.
    Node(NodeId),
    /// In transit on an edge; the index is the group's position on it.
    Edge(EdgeKey, usize),
}

/// A reference the renderers cannot resolve. Recorded, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanglingRef {
    /// Edge endpoint missing from the node set.
    EdgeEndpoint {
        /// The edge.
        edge: EdgeKey,
        /// The missing node.
        node: NodeId,
    },
    /// Link target missing from the node set.
    LinkTarget {
        /// The linking group.
        from: GroupLocation,
        /// The missing node.
        target: NodeId,
    },
    /// Group whose team is missing from the team set.
    GroupTeam {
        /// The group.
        location: GroupLocation,
        /// The missing team.
        team: TeamId,
    },
    /// Queen whose owner is missing from the team set.
    QueenOwner {
        /// The queen node.
        node: NodeId,
        /// The missing team.
        team: TeamId,
    },
}

/// Normalized, immutable model of one simulation step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub(crate) teams: Vec<Team>,
    pub(crate) team_index: FxHashMap<TeamId, usize>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) node_index: FxHashMap<NodeId, usize>,
    pub(crate) edges: EdgeSet,
    max_food: f32,
}

impl WorldSnapshot {
    /// Normalize a raw record into a snapshot.
    ///
    /// Fails with [`ColonyError::MalformedSnapshot`] on duplicate team or
    /// node ids, non-finite node positions, and edges whose endpoints are
    /// missing, conflicting, or identical. Out-of-range `progress` and
    /// `life_ratio` values are clamped, missing optional fields defaulted.
    pub fn build(raw: &RawSnapshot) -> Result<Self, ColonyError> {
        let mut snapshot = Self {
            max_food: clamp_quantity(raw.max_food),
            ..Self::default()
        };

        for raw_team in &raw.teams {
            if snapshot
                .team_index
                .insert(raw_team.id, snapshot.teams.len())
                .is_some()
            {
                return Err(ColonyError::malformed(format!(
                    "duplicate team id {}",
                    raw_team.id
                )));
            }
            snapshot.teams.push(Team::from_raw(raw_team));
        }

        for raw_node in &raw.nodes {
            let node = Node::from_raw(raw_node)?;
            if snapshot
                .node_index
                .insert(node.id, snapshot.nodes.len())
                .is_some()
            {
                return Err(ColonyError::malformed(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
            snapshot.nodes.push(node);
        }

        for (position, raw_edge) in raw.edges.iter().enumerate() {
            let key = resolve_edge_key(raw_edge).map_err(|reason| {
                ColonyError::malformed(format!("edge #{position}: {reason}"))
            })?;
            let edge = Edge {
                key,
                life_ratio: clamp_unit(raw_edge.life_ratio.unwrap_or(0.0)),
                groups: raw_edge.groups.iter().map(TransitGroup::from_raw).collect(),
            };
            if snapshot.edges.insert(edge).is_some() {
                log::debug!(
                    "edge {}-{} listed twice, keeping the later record",
                    key.low(),
                    key.high()
                );
            }
        }

        let dangling = snapshot.dangling_references();
        if !dangling.is_empty() {
            log::warn!(
                "snapshot has {} dangling reference(s), first: {:?}",
                dangling.len(),
                dangling[0]
            );
        }

        Ok(snapshot)
    }

    /// Teams in load order.
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Team by id.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.team_index.get(&id).map(|&i| &self.teams[i])
    }

    /// Position of a team in load order.
    #[must_use]
    pub fn team_index(&self, id: TeamId) -> Option<usize> {
        self.team_index.get(&id).copied()
    }

    /// Nodes in load order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&i| &self.nodes[i])
    }

    /// All edges.
    #[must_use]
    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    /// Global food normalization constant.
    #[must_use]
    pub fn max_food(&self) -> f32 {
        self.max_food
    }

    /// References renderers will have to skip.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingRef> {
        let mut dangling = Vec::new();
        let has_node = |id: NodeId| self.node_index.contains_key(&id);
        let has_team = |id: TeamId| self.team_index.contains_key(&id);

        for node in &self.nodes {
            if node.kind == NodeKind::Queen && !has_team(node.owner_team) {
                dangling.push(DanglingRef::QueenOwner {
                    node: node.id,
                    team: node.owner_team,
                });
            }
            let location = GroupLocation::Node(node.id);
            for group in node.ants.iter().chain(node.next_ants.iter().flatten()) {
                if !has_team(group.team) {
                    dangling.push(DanglingRef::GroupTeam {
                        location,
                        team: group.team,
                    });
                }
                for &target in &group.links {
                    if !has_node(target) {
                        dangling.push(DanglingRef::LinkTarget {
                            from: location,
                            target,
                        });
                    }
                }
            }
        }

        for edge in &self.edges {
            for node in edge.key.endpoints() {
                if !has_node(node) {
                    dangling.push(DanglingRef::EdgeEndpoint {
                        edge: edge.key,
                        node,
                    });
                }
            }
            for (index, group) in edge.groups.iter().enumerate() {
                let location = GroupLocation::Edge(edge.key, index);
                if !has_team(group.team) {
                    dangling.push(DanglingRef::GroupTeam {
                        location,
                        team: group.team,
                    });
                }
                let targets = group
                    .links
                    .iter()
                    .chain(group.next_links.iter().flatten());
                for &target in targets {
                    if !has_node(target) {
                        dangling.push(DanglingRef::LinkTarget {
                            from: location,
                            target,
                        });
                    }
                }
            }
        }

        dangling.dedup();
        dangling
    }

    /// Canonical raw form: `ids` endpoint pairs, `links` lists, clamped
    /// ratios and progress values.
    #[must_use]
    pub fn to_raw(&self) -> RawSnapshot {
        RawSnapshot {
            teams: self
                .teams
                .iter()
                .map(|team| RawTeam {
                    id: team.id,
                    name: team.name.clone(),
                    color: team.color_text.clone(),
                    score: team.score as i64,
                    next_score: team.next_score.map(|s| s as i64),
                })
                .collect(),
            nodes: self.nodes.iter().map(Node::to_raw).collect(),
            edges: self
                .edges
                .iter()
                .map(|edge| RawEdge {
                    ids: Some(edge.key.endpoints().to_vec()),
                    id_1: None,
                    id_2: None,
                    life_ratio: Some(clamp_unit(edge.life_ratio)),
                    groups: edge.groups.iter().map(TransitGroup::to_raw).collect(),
                })
                .collect(),
            max_food: self.max_food,
        }
    }
}

/// Canonical key from either endpoint schema. When both schemas are
/// present they must name the same pair; no precedence is assumed.
fn resolve_edge_key(raw: &RawEdge) -> Result<EdgeKey, String> {
    let from_ids = match raw.ids.as_deref() {
        Some(&[a, b]) => Some((a, b)),
        Some(other) => {
            return Err(format!(
                "`ids` must name exactly two nodes, got {}",
                other.len()
            ))
        }
        None => None,
    };
    let from_flat = match (raw.id_1, raw.id_2) {
        (Some(a), Some(b)) => Some((a, b)),
        (None, None) => None,
        _ => return Err("only one of `id_1`/`id_2` given".to_owned()),
    };

    let (a, b) = match (from_ids, from_flat) {
        (Some(pair), None) | (None, Some(pair)) => pair,
        (Some(pair), Some(flat)) => {
            if EdgeKey::new(pair.0, pair.1) != EdgeKey::new(flat.0, flat.1) {
                return Err(format!(
                    "`ids` {pair:?} conflicts with `id_1`/`id_2` {flat:?}"
                ));
            }
            pair
        }
        (None, None) => return Err("no endpoints".to_owned()),
    };

    EdgeKey::new(a, b).ok_or_else(|| format!("self-loop on node {a}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> WorldSnapshot {
        let raw: RawSnapshot = serde_json::from_str(json).unwrap();
        WorldSnapshot::build(&raw).unwrap()
    }

    fn build_err(json: &str) -> ColonyError {
        let raw: RawSnapshot = serde_json::from_str(json).unwrap();
        WorldSnapshot::build(&raw).unwrap_err()
    }

    const WORLD: &str = r##"{
        "teams": [
            {"id": 2, "name": "Red", "color": "#ff0000", "score": 4},
            {"id": 1, "name": "Blue", "color": "blue", "score": -3}
        ],
        "nodes": [
            {"id": 10, "x": 0, "y": 0, "type": "QUEEN", "team": 2, "food": 9,
             "ants": [{"team": 2, "qt": 3, "link": 11}, {"team": 1, "qt": -5}]},
            {"id": 11, "x": 4, "y": 0, "type": "FOOD", "food": 20, "team": 1},
            {"id": 12, "x": 4, "y": 3, "type": "EAU"},
            {"id": 13, "x": 0, "y": 3}
        ],
        "edges": [
            {"ids": [11, 10], "life_ratio": 1.7,
             "groups": [{"team": 2, "qt": 2, "progress": -0.2}]},
            {"id_1": 12, "id_2": 11}
        ],
        "maxFood": 40
    }"##;

    #[test]
    fn builds_typed_entities() {
        let world = snapshot(WORLD);
        assert_eq!(world.teams().len(), 2);
        assert_eq!(world.teams()[0].id, 2);
        assert_eq!(world.team(1).unwrap().score, 0);
        assert_eq!(world.team(2).unwrap().color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(world.team_index(1), Some(1));
        assert_eq!(world.max_food(), 40.0);

        let queen = world.node(10).unwrap();
        assert_eq!(queen.kind, NodeKind::Queen);
        assert_eq!(queen.owner_team, 2);
        assert_eq!(queen.food, 0.0);
        assert_eq!(queen.group(2).unwrap().links, vec![11]);
        assert_eq!(queen.group(1).unwrap().quantity, 0.0);

        let food = world.node(11).unwrap();
        assert_eq!(food.food, 20.0);
        assert_eq!(food.owner_team, 0);
        assert_eq!(world.node(12).unwrap().kind, NodeKind::Water);
        assert_eq!(world.node(13).unwrap().kind, NodeKind::Empty);
    }

    #[test]
    fn defaults_and_clamps_edges() {
        let world = snapshot(WORLD);
        let edge = world.edges().get(10, 11).unwrap();
        assert_eq!(edge.life_ratio, 1.0);
        assert_eq!(edge.groups[0].progress, 0.0);
        let flat = world.edges().get(11, 12).unwrap();
        assert_eq!(flat.life_ratio, 0.0);
        assert!(flat.groups.is_empty());
    }

    #[test]
    fn reversed_edge_is_the_same_entity() {
        let forward = snapshot(
            r#"{"nodes":[{"id":1,"x":0,"y":0},{"id":2,"x":1,"y":0}],
                "edges":[{"ids":[1,2],"life_ratio":0.4,"groups":[{"team":1,"qt":2,"progress":0.3}]}]}"#,
        );
        let reverse = snapshot(
            r#"{"nodes":[{"id":1,"x":0,"y":0},{"id":2,"x":1,"y":0}],
                "edges":[{"ids":[2,1],"life_ratio":0.4,"groups":[{"team":1,"qt":2,"progress":0.3}]}]}"#,
        );
        assert_eq!(forward.edges().get(2, 1), reverse.edges().get(1, 2));
        assert_eq!(forward.edges(), reverse.edges());
    }

    #[test]
    fn merges_link_and_links() {
        let world = snapshot(
            r#"{"nodes":[{"id":1,"x":0,"y":0,
                "ants":[{"team":1,"qt":1,"link":3,"links":[2,3,4]},
                        {"team":1,"qt":5,"links":[9]}]}]}"#,
        );
        let node = world.node(1).unwrap();
        assert_eq!(node.ants.len(), 1);
        assert_eq!(node.ants[0].quantity, 5.0);
        assert_eq!(node.ants[0].links, vec![9]);

        let legacy = snapshot(
            r#"{"nodes":[{"id":1,"x":0,"y":0,
                "ants":[{"team":1,"qt":1,"link":3,"links":[2,3,4]}]}]}"#,
        );
        assert_eq!(legacy.node(1).unwrap().ants[0].links, vec![3, 2, 4]);
    }

    #[test]
    fn reads_inline_next_state() {
        let world = snapshot(
            r#"{"nodes":[
                {"id":1,"x":0,"y":0,"type":"FOOD","food":5,"anim":{"food":3}},
                {"id":2,"x":0,"y":0,"type":"FOOD","food":5,"nextFood":4,"nextAnts":[{"team":1,"qt":2}]},
                {"id":3,"x":1,"y":0,"nextFood":4}],
              "edges":[{"ids":[1,2],"groups":[
                {"team":1,"qt":1,"progress":0.2,"anim":{"progress":1.4,"link":3}},
                {"team":1,"qt":1,"progress":0.2,"nextProgress":0.5,"anim":{"progress":0.9}}]}]}"#,
        );
        assert_eq!(world.node(1).unwrap().next_food, Some(3.0));
        assert_eq!(world.node(2).unwrap().next_food, Some(4.0));
        assert_eq!(world.node(2).unwrap().next_group(1).unwrap().quantity, 2.0);
        assert_eq!(world.node(3).unwrap().next_food, None);

        let groups = &world.edges().get(1, 2).unwrap().groups;
        assert_eq!(groups[0].next_progress, Some(1.0));
        assert_eq!(groups[0].next_links, Some(vec![3]));
        assert_eq!(groups[1].next_progress, Some(0.5));
        assert_eq!(groups[1].next_links, None);
    }

    #[test]
    fn rejects_structural_inconsistencies() {
        let dup_node = build_err(
            r#"{"nodes":[{"id":1,"x":0,"y":0},{"id":1,"x":1,"y":0}]}"#,
        );
        assert!(dup_node.to_string().contains("duplicate node id 1"));

        let dup_team = build_err(r#"{"teams":[{"id":1},{"id":1}]}"#);
        assert!(dup_team.to_string().contains("duplicate team id 1"));

        let no_endpoints = build_err(r#"{"edges":[{"life_ratio":1}]}"#);
        assert!(matches!(no_endpoints, ColonyError::MalformedSnapshot { .. }));

        let half = build_err(r#"{"edges":[{"id_1":1}]}"#);
        assert!(half.to_string().contains("id_1"));

        let triple = build_err(r#"{"edges":[{"ids":[1,2,3]}]}"#);
        assert!(triple.to_string().contains("exactly two"));

        let self_loop = build_err(r#"{"edges":[{"ids":[4,4]}]}"#);
        assert!(self_loop.to_string().contains("self-loop"));

        let conflict = build_err(r#"{"edges":[{"ids":[1,2],"id_1":1,"id_2":3}]}"#);
        assert!(conflict.to_string().contains("conflicts"));
    }

    #[test]
    fn agreeing_endpoint_schemas_are_accepted() {
        let world = snapshot(r#"{"edges":[{"ids":[1,2],"id_1":2,"id_2":1}]}"#);
        assert!(world.edges().get(1, 2).is_some());
    }

    #[test]
    fn records_dangling_references_without_failing() {
        let world = snapshot(
            r#"{"teams":[{"id":1}],
                "nodes":[{"id":1,"x":0,"y":0,"type":"QUEEN","team":5,
                          "ants":[{"team":3,"qt":1,"links":[99]}]}],
                "edges":[{"ids":[1,7],"groups":[{"team":1,"qt":1,"progress":0.5,"nextLinks":[42]}]}]}"#,
        );
        let dangling = world.dangling_references();
        assert!(dangling.contains(&DanglingRef::QueenOwner { node: 1, team: 5 }));
        assert!(dangling.contains(&DanglingRef::GroupTeam {
            location: GroupLocation::Node(1),
            team: 3
        }));
        assert!(dangling.contains(&DanglingRef::LinkTarget {
            from: GroupLocation::Node(1),
            target: 99
        }));
        let key = EdgeKey::new(1, 7).unwrap();
        assert!(dangling.contains(&DanglingRef::EdgeEndpoint { edge: key, node: 7 }));
        assert!(dangling.contains(&DanglingRef::LinkTarget {
            from: GroupLocation::Edge(key, 0),
            target: 42
        }));
        assert_eq!(dangling.len(), 5);
    }

    #[test]
    fn rejects_non_finite_positions() {
        let raw = RawSnapshot {
            nodes: vec![RawNode {
                id: 1,
                x: f32::NAN,
                y: 0.0,
                kind: None,
                food: None,
                team: None,
                pheromone: 0.0,
                ants: Vec::new(),
                next_ants: None,
                next_food: None,
                anim: None,
            }],
            ..RawSnapshot::default()
        };
        assert!(WorldSnapshot::build(&raw).is_err());
    }

    #[test]
    fn reserialization_stays_clamped() {
        let world = snapshot(
            r#"{"nodes":[{"id":1,"x":0,"y":0},{"id":2,"x":1,"y":0}],
                "edges":[{"id_1":2,"id_2":1,"lifeRatio":-3,
                          "groups":[{"team":1,"qt":1,"progress":9,"nextProgress":-1}]}]}"#,
        );
        let json = serde_json::to_string(&world.to_raw()).unwrap();
        let again: RawSnapshot = serde_json::from_str(&json).unwrap();
        let edge = &again.edges[0];
        assert_eq!(edge.ids, Some(vec![1, 2]));
        assert_eq!(edge.life_ratio, Some(0.0));
        assert_eq!(edge.groups[0].progress, 1.0);
        assert_eq!(edge.groups[0].next_progress, Some(0.0));

        let rebuilt = WorldSnapshot::build(&again).unwrap();
        assert_eq!(rebuilt, world);
    }
}
