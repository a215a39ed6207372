//! Per-step scene: the visual entities of one snapshot plus the tracks that
//! carry them to the next snapshot.
//!
//! Building a [`StepScene`] walks the snapshot once. Every team, node,
//! edge, transit group and link line gets a visual entity; each entity
//! whose value differs between the snapshot and its next-state fields also
//! registers a track with the scene's [`Scheduler`]. Unchanged entities keep
//! a fixed value and never touch the scheduler. Entities that reference a
//! node or team missing from the snapshot are skipped.

use glam::Vec2;

use super::draw::{DrawCommand, Stroke};
use super::layout::Layout;
use super::legend::{legend_anchors, legend_entry};
use crate::animation::{
    diff_links, lerp_vec2, marker_sides, marker_size, EdgePath,
    GeneratorKind, LinkChange, LinkTween, PartitionTween, ScalarTween,
    Scheduler, Track, TrackId, TransitTween,
};
use crate::options::{GeometryOptions, Options};
use crate::util::color::{Color, Colorizer};
use crate::world::{EdgeKey, NodeId, NodeKind, TeamId, WorldSnapshot};

/// Queen content: four arcs of this span, a quarter turn apart.
const QUEEN_ARC_SPAN: f32 = 60.0;
const QUEEN_ARC_WIDTH: f32 = 10.0;
/// Water and queen content relative to the node disc.
const CONTENT_SCALE: f32 = 0.5;
/// Largest food disc relative to the node disc.
const FOOD_SCALE: f32 = 0.8;

trait FromTrack {
    fn from_track(track: &Track) -> Option<&Self>;
}

impl FromTrack for ScalarTween {
    fn from_track(track: &Track) -> Option<&Self> {
        track.as_scalar()
    }
}

impl FromTrack for PartitionTween {
    fn from_track(track: &Track) -> Option<&Self> {
        track.as_partition()
    }
}

impl FromTrack for TransitTween {
    fn from_track(track: &Track) -> Option<&Self> {
        track.as_transit()
    }
}

/// A value that is either fixed for the step or owned by the scheduler.
#[derive(Debug, Clone)]
enum Slot<T> {
    Fixed(T),
    Scheduled(TrackId),
}

impl<T: Into<Track>> Slot<T> {
    fn new(
        scheduler: &mut Scheduler,
        kind: GeneratorKind,
        tween: T,
        changes: bool,
    ) -> Self {
        if changes {
            Self::Scheduled(scheduler.register(kind, tween))
        } else {
            Self::Fixed(tween)
        }
    }
}

impl<T: FromTrack> Slot<T> {
    fn get<'a>(&'a self, scheduler: &'a Scheduler) -> Option<&'a T> {
        match self {
            Self::Fixed(tween) => Some(tween),
            Self::Scheduled(id) => scheduler.track(*id).and_then(T::from_track),
        }
    }
}

#[derive(Debug, Clone)]
struct TeamVisual {
    id: TeamId,
    name: String,
    color: Color,
    score: Slot<ScalarTween>,
}

#[derive(Debug, Clone)]
struct NodeVisual {
    id: NodeId,
    center: Vec2,
    kind: NodeKind,
    fill: Color,
    owner_color: Option<Color>,
    ring: Slot<PartitionTween>,
    food: Slot<ScalarTween>,
}

#[derive(Debug, Clone)]
struct MarkerVisual {
    color: Color,
    sides: u32,
    size: f32,
    motion: Slot<TransitTween>,
}

#[derive(Debug, Clone)]
struct EdgeVisual {
    key: EdgeKey,
    from: Vec2,
    to: Vec2,
    stroke: Color,
    path: EdgePath,
    markers: Vec<MarkerVisual>,
}

#[derive(Debug, Clone, Copy)]
enum LinkOrigin {
    Node(Vec2),
    Marker { edge: usize, marker: usize },
}

#[derive(Debug, Clone)]
struct LinkVisual {
    team: TeamId,
    target: NodeId,
    origin: LinkOrigin,
    end: Vec2,
    color: Color,
    tween: Option<TrackId>,
}

/// Sampled state of one transit marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerState {
    /// Canvas position.
    pub position: Vec2,
    /// Fraction of the edge travelled.
    pub progress: f32,
    /// Opacity (fades to 0 when arriving at an endpoint).
    pub opacity: f32,
}

/// Sampled state of one link line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkState {
    /// Team building towards the target.
    pub team: TeamId,
    /// Destination node.
    pub target: NodeId,
    /// Drawn fraction of the line.
    pub extension: f32,
    /// `None` when the line is present in both snapshots.
    pub change: Option<LinkChange>,
}

/// Visual entities and animation tracks for one simulation step.
#[derive(Debug, Clone)]
pub struct StepScene {
    layout: Layout,
    geometry: GeometryOptions,
    show_legend: bool,
    max_food: f32,
    team_colors: Vec<Color>,
    scheduler: Scheduler,
    teams: Vec<TeamVisual>,
    nodes: Vec<NodeVisual>,
    edges: Vec<EdgeVisual>,
    links: Vec<LinkVisual>,
}

impl StepScene {
    /// Build the scene for `world`, registering a track for everything
    /// that changes before the next step.
    ///
    /// `world` should already carry its next-state fields (see
    /// [`WorldSnapshot::with_next`]); without them the scene is static.
    pub fn build(
        world: &WorldSnapshot,
        options: &Options,
        colorizer: &Colorizer,
    ) -> Self {
        let layout = Layout::fit(
            world.nodes().iter().map(|node| node.position),
            &options.geometry,
        );
        let mut scene = Self {
            layout,
            geometry: options.geometry.clone(),
            show_legend: options.display.show_team_legend,
            max_food: world.max_food(),
            team_colors: world.teams().iter().map(|team| team.color).collect(),
            scheduler: Scheduler::new(options.animation.easing),
            teams: Vec::with_capacity(world.teams().len()),
            nodes: Vec::with_capacity(world.nodes().len()),
            edges: Vec::with_capacity(world.edges().len()),
            links: Vec::new(),
        };
        scene.add_teams(world);
        scene.add_edges(world);
        scene.add_nodes(world, colorizer);

        log::debug!(
            "step scene: {} teams, {} nodes, {} edges, {} links, {} tracks",
            scene.teams.len(),
            scene.nodes.len(),
            scene.edges.len(),
            scene.links.len(),
            scene.scheduler.len()
        );
        scene
    }

    fn add_teams(&mut self, world: &WorldSnapshot) {
        for team in world.teams() {
            let from = team.score as f32;
            let to = team.next_score.map_or(from, |score| score as f32);
            let score = Slot::new(
                &mut self.scheduler,
                GeneratorKind::ScoreUpdate,
                ScalarTween::new(from, to),
                from != to,
            );
            self.teams.push(TeamVisual {
                id: team.id,
                name: team.name.clone(),
                color: team.color,
                score,
            });
        }
    }

    fn add_edges(&mut self, world: &WorldSnapshot) {
        let rim = self.layout.node_size() * self.geometry.ring_scale * 0.5;
        let marker_base =
            self.layout.node_size() * self.geometry.marker_size_factor;

        for edge in world.edges().by_life_ratio() {
            let [a, b] = edge.key.endpoints();
            let (Some(node_a), Some(node_b)) = (world.node(a), world.node(b))
            else {
                log::debug!("skipping edge {a}-{b}: missing endpoint");
                continue;
            };
            let from = self.layout.to_canvas(node_a.position);
            let to = self.layout.to_canvas(node_b.position);
            let edge_index = self.edges.len();
            let mut markers = Vec::new();

            for group in edge.groups.iter().filter(|g| g.quantity > 0.0) {
                let Some(team) = world.team(group.team) else {
                    continue;
                };
                let tween = TransitTween::new(
                    group.progress,
                    group.next_progress,
                    self.geometry.endpoint_fade_window,
                );
                let changes = tween.changes();
                let motion = Slot::new(
                    &mut self.scheduler,
                    GeneratorKind::EdgeMovement,
                    tween,
                    changes,
                );
                let origin = LinkOrigin::Marker {
                    edge: edge_index,
                    marker: markers.len(),
                };
                markers.push(MarkerVisual {
                    color: team.color,
                    sides: marker_sides(group.quantity),
                    size: marker_size(
                        group.quantity,
                        marker_base,
                        self.geometry.marker_saturation,
                    ),
                    motion,
                });

                let next_links =
                    group.next_links.as_deref().unwrap_or(&group.links);
                self.add_links(
                    world,
                    (team.id, team.color),
                    origin,
                    &group.links,
                    next_links,
                );
            }

            self.edges.push(EdgeVisual {
                key: edge.key,
                from,
                to,
                stroke: Color::BLACK.lerp(Color::WHITE, edge.life_ratio),
                path: EdgePath::new(from, to, rim),
                markers,
            });
        }
    }

    fn add_nodes(&mut self, world: &WorldSnapshot, colorizer: &Colorizer) {
        let min_degrees = self.geometry.min_segment_degrees;
        for node in world.nodes() {
            let center = self.layout.to_canvas(node.position);

            let current = node.quantities(world.teams());
            let ring = match node.next_quantities(world.teams()) {
                Some(next) => {
                    let tween = PartitionTween::new(&current, &next, min_degrees);
                    let changes = tween.changes();
                    Slot::new(
                        &mut self.scheduler,
                        GeneratorKind::NodeUpdate,
                        tween,
                        changes,
                    )
                }
                None => Slot::Fixed(PartitionTween::fixed(&current, min_degrees)),
            };

            let next_food = match node.kind {
                NodeKind::Food => node.next_food.unwrap_or(node.food),
                _ => node.food,
            };
            let food = Slot::new(
                &mut self.scheduler,
                GeneratorKind::FoodUpdate,
                ScalarTween::new(node.food, next_food),
                next_food != node.food,
            );

            let owner_color = match node.kind {
                NodeKind::Queen => world.team(node.owner_team).map(|t| t.color),
                _ => None,
            };

            self.nodes.push(NodeVisual {
                id: node.id,
                center,
                kind: node.kind,
                fill: colorizer.colorize(node.pheromone),
                owner_color,
                ring,
                food,
            });

            let mut teams: Vec<TeamId> =
                node.ants.iter().map(|group| group.team).collect();
            for group in node.next_ants.iter().flatten() {
                if !teams.contains(&group.team) {
                    teams.push(group.team);
                }
            }
            for team_id in teams {
                let Some(team) = world.team(team_id) else {
                    continue;
                };
                let links_now =
                    node.group(team_id).map_or(&[][..], |g| g.links.as_slice());
                let links_next = match node.next_ants {
                    Some(_) => node
                        .next_group(team_id)
                        .map_or(&[][..], |g| g.links.as_slice()),
                    None => links_now,
                };
                self.add_links(
                    world,
                    (team.id, team.color),
                    LinkOrigin::Node(center),
                    links_now,
                    links_next,
                );
            }
        }
    }

    fn add_links(
        &mut self,
        world: &WorldSnapshot,
        (team, color): (TeamId, Color),
        origin: LinkOrigin,
        current: &[NodeId],
        next: &[NodeId],
    ) {
        let diff = diff_links(current, next);
        let lines = diff
            .unchanged
            .iter()
            .map(|&target| (target, None))
            .chain(diff.appeared.iter().map(|&t| (t, Some(LinkChange::Appear))))
            .chain(
                diff.disappeared
                    .iter()
                    .map(|&t| (t, Some(LinkChange::Disappear))),
            );

        for (target, change) in lines {
            let Some(node) = world.node(target) else {
                log::debug!("skipping link to missing node {target}");
                continue;
            };
            let tween = change.map(|change| match change {
                LinkChange::Appear => self
                    .scheduler
                    .register(GeneratorKind::OnNodeLink, LinkTween::appear()),
                LinkChange::Disappear => self
                    .scheduler
                    .register(GeneratorKind::OnNodeUnlink, LinkTween::disappear()),
            });
            self.links.push(LinkVisual {
                team,
                target,
                origin,
                end: self.layout.to_canvas(node.position),
                color,
                tween,
            });
        }
    }

    /// Move every track of the step to `progress`.
    pub fn advance(&mut self, progress: f32) {
        self.scheduler.advance(progress);
    }

    /// Raw progress of the step.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.scheduler.progress()
    }

    /// Whether the step has played through.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scheduler.is_complete()
    }

    /// The step's tracks.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// World-to-canvas transform.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Displayed score of `team`.
    #[must_use]
    pub fn score(&self, team: TeamId) -> Option<f32> {
        let visual = self.teams.iter().find(|t| t.id == team)?;
        visual.score.get(&self.scheduler).map(ScalarTween::value)
    }

    /// Population ring of `node`.
    #[must_use]
    pub fn ring(&self, node: NodeId) -> Option<&PartitionTween> {
        let visual = self.nodes.iter().find(|n| n.id == node)?;
        visual.ring.get(&self.scheduler)
    }

    /// Displayed food level of `node`.
    #[must_use]
    pub fn food(&self, node: NodeId) -> Option<f32> {
        let visual = self.nodes.iter().find(|n| n.id == node)?;
        visual.food.get(&self.scheduler).map(ScalarTween::value)
    }

    /// The `index`-th drawn marker on edge `key`.
    #[must_use]
    pub fn marker(&self, key: EdgeKey, index: usize) -> Option<MarkerState> {
        let edge = self.edges.iter().position(|e| e.key == key)?;
        self.marker_state(edge, index)
    }

    fn marker_state(&self, edge: usize, marker: usize) -> Option<MarkerState> {
        let visual = self.edges.get(edge)?;
        let motion = visual.markers.get(marker)?.motion.get(&self.scheduler)?;
        Some(MarkerState {
            position: motion.position(&visual.path),
            progress: motion.progress(),
            opacity: motion.opacity(),
        })
    }

    fn link_extension(&self, link: &LinkVisual) -> (f32, Option<LinkChange>) {
        link.tween
            .and_then(|id| self.scheduler.track(id))
            .and_then(Track::as_link)
            .map_or((1.0, None), |tween| {
                (tween.extension(), Some(tween.change()))
            })
    }

    /// Every link line, in draw order.
    #[must_use]
    pub fn links(&self) -> Vec<LinkState> {
        self.links
            .iter()
            .map(|link| {
                let (extension, change) = self.link_extension(link);
                LinkState {
                    team: link.team,
                    target: link.target,
                    extension,
                    change,
                }
            })
            .collect()
    }

    /// Draw commands for the current progress, in painter's order: edges
    /// and their markers, link lines, nodes, then the team legend.
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        self.draw_edges(&mut out);
        self.draw_links(&mut out);
        self.draw_nodes(&mut out);
        if self.show_legend {
            self.draw_legend(&mut out);
        }
        out
    }

    fn draw_edges(&self, out: &mut Vec<DrawCommand>) {
        let width = self.layout.node_size() * self.geometry.edge_width_factor;
        for (edge_index, edge) in self.edges.iter().enumerate() {
            out.push(DrawCommand::Line {
                from: edge.from,
                to: edge.to,
                width,
                color: edge.stroke,
                dash: None,
            });
            for (marker_index, marker) in edge.markers.iter().enumerate() {
                let Some(state) = self.marker_state(edge_index, marker_index)
                else {
                    continue;
                };
                out.push(DrawCommand::Polygon {
                    center: state.position,
                    sides: marker.sides,
                    size: marker.size,
                    fill: marker.color,
                    opacity: state.opacity,
                });
            }
        }
    }

    fn draw_links(&self, out: &mut Vec<DrawCommand>) {
        for link in &self.links {
            let start = match link.origin {
                LinkOrigin::Node(center) => center,
                LinkOrigin::Marker { edge, marker } => self
                    .marker_state(edge, marker)
                    .map_or(link.end, |state| state.position),
            };
            let (extension, _) = self.link_extension(link);
            out.push(DrawCommand::Line {
                from: start,
                to: lerp_vec2(extension, start, link.end),
                width: self.geometry.link_width,
                color: link.color,
                dash: Some(self.geometry.link_dash),
            });
        }
    }

    fn draw_nodes(&self, out: &mut Vec<DrawCommand>) {
        let size = self.layout.node_size();
        for node in &self.nodes {
            if let Some(ring) = node.ring.get(&self.scheduler) {
                for (segment, &color) in ring.segments().iter().zip(&self.team_colors) {
                    out.push(DrawCommand::Arc {
                        center: node.center,
                        diameter: size * self.geometry.ring_scale,
                        start_angle: segment.start_degrees(),
                        end_angle: segment.end_degrees(),
                        fill: Some(color),
                        stroke: None,
                        opacity: segment.opacity,
                    });
                }
            }

            out.push(disc(
                node.center,
                size,
                node.fill,
                Some(Stroke {
                    color: Color::WHITE,
                    width: self.geometry.node_stroke_width,
                }),
            ));

            self.draw_content(node, size, out);
        }
    }

    fn draw_content(&self, node: &NodeVisual, size: f32, out: &mut Vec<DrawCommand>) {
        match node.kind {
            NodeKind::Empty => {}
            NodeKind::Water => {
                out.push(DrawCommand::Arc {
                    center: node.center,
                    diameter: size * CONTENT_SCALE,
                    start_angle: 0.0,
                    end_angle: 180.0,
                    fill: Some(Color::WATER),
                    stroke: None,
                    opacity: 1.0,
                });
                out.push(DrawCommand::Polygon {
                    center: node.center,
                    sides: 4,
                    size: size * CONTENT_SCALE,
                    fill: Color::WATER,
                    opacity: 1.0,
                });
            }
            NodeKind::Food => {
                let food = node
                    .food
                    .get(&self.scheduler)
                    .map_or(0.0, ScalarTween::value);
                let full = self.max_food.max(food);
                let ratio = if full > 0.0 { food / full } else { 0.0 };
                out.push(disc(node.center, size * FOOD_SCALE * ratio, Color::FOOD, None));
            }
            NodeKind::Queen => {
                let Some(color) = node.owner_color else {
                    return;
                };
                for quarter in 0..4_u8 {
                    let start = f32::from(quarter) * 90.0;
                    out.push(DrawCommand::Arc {
                        center: node.center,
                        diameter: size * CONTENT_SCALE,
                        start_angle: start,
                        end_angle: start + QUEEN_ARC_SPAN,
                        fill: None,
                        stroke: Some(Stroke {
                            color,
                            width: QUEEN_ARC_WIDTH,
                        }),
                        opacity: 1.0,
                    });
                }
            }
        }
    }

    fn draw_legend(&self, out: &mut Vec<DrawCommand>) {
        let half_extent = Vec2::new(
            self.geometry.canvas_width,
            self.geometry.canvas_height,
        ) * 0.5;
        for (anchor, team) in legend_anchors(self.teams.len()).into_iter().zip(&self.teams) {
            let score = team.score.get(&self.scheduler).map_or(0.0, ScalarTween::value);
            out.extend(legend_entry(anchor, half_extent, &team.name, team.color, score));
        }
    }
}

fn disc(center: Vec2, diameter: f32, fill: Color, stroke: Option<Stroke>) -> DrawCommand {
    DrawCommand::Arc {
        center,
        diameter,
        start_angle: 0.0,
        end_angle: 360.0,
        fill: Some(fill),
        stroke,
        opacity: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::RawSnapshot;

    fn world(json: &str) -> WorldSnapshot {
        let raw: RawSnapshot = serde_json::from_str(json).unwrap();
        WorldSnapshot::build(&raw).unwrap()
    }

    fn step(current: &str, next: &str) -> StepScene {
        let paired = world(current).with_next(&world(next));
        StepScene::build(&paired, &Options::default(), &Colorizer::default())
    }

    const TEAMS: &str = r##""teams":[{"id":1,"name":"A","color":"#ff0000","score":0},
                                     {"id":2,"name":"B","color":"#0000ff","score":0}]"##;

    #[test]
    fn losing_team_hands_ring_to_survivor() {
        let mut scene = step(
            &format!(
                r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,
                    "ants":[{{"team":1,"qt":3}},{{"team":2,"qt":1}}]}}]}}"#
            ),
            &format!(
                r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,
                    "ants":[{{"team":2,"qt":1}}]}}]}}"#
            ),
        );
        assert_eq!(scene.scheduler().count(GeneratorKind::NodeUpdate), 1);
        assert_eq!(scene.scheduler().len(), 1);
        assert_eq!(scene.ring(1).unwrap().boundaries(), &[0.0, 0.75, 1.0]);

        scene.advance(1.0);
        let ring = scene.ring(1).unwrap();
        assert_eq!(ring.boundaries(), &[0.0, 0.0, 1.0]);
        assert_eq!(ring.segment(1).unwrap().width(), 1.0);
    }

    #[test]
    fn transit_crosses_edge_and_fades() {
        let nodes = r#""nodes":[{"id":1,"x":0,"y":0},{"id":2,"x":100,"y":0},
                                {"id":3,"x":0,"y":100}]"#;
        let mut scene = step(
            &format!(
                r#"{{{TEAMS},{nodes},"edges":[{{"ids":[1,2],
                    "groups":[{{"team":1,"qt":5,"progress":0}}]}}]}}"#
            ),
            &format!(
                r#"{{{TEAMS},{nodes},"edges":[{{"ids":[1,2],
                    "groups":[{{"team":1,"qt":5,"progress":1}}]}}]}}"#
            ),
        );
        assert_eq!(scene.scheduler().count(GeneratorKind::EdgeMovement), 1);
        let key = EdgeKey::new(1, 2).unwrap();

        let start = scene.marker(key, 0).unwrap();
        assert_eq!(start.progress, 0.0);
        assert_eq!(start.opacity, 1.0);

        scene.advance(0.5);
        assert_eq!(scene.marker(key, 0).unwrap().opacity, 1.0);

        scene.advance(1.0);
        let end = scene.marker(key, 0).unwrap();
        assert_eq!(end.progress, 1.0);
        assert_eq!(end.opacity, 0.0);
        assert!(end.position.x > start.position.x);
    }

    #[test]
    fn retargeted_link_appears_and_disappears() {
        let nodes = |target: u32| {
            format!(
                r#""nodes":[{{"id":1,"x":0,"y":0,"ants":[{{"team":1,"qt":2,"links":[{target}]}}]}},
                            {{"id":5,"x":4,"y":0}},{{"id":7,"x":0,"y":4}}]"#
            )
        };
        let mut scene = step(
            &format!("{{{TEAMS},{}}}", nodes(5)),
            &format!("{{{TEAMS},{}}}", nodes(7)),
        );
        assert_eq!(scene.scheduler().count(GeneratorKind::OnNodeLink), 1);
        assert_eq!(scene.scheduler().count(GeneratorKind::OnNodeUnlink), 1);

        let links = scene.links();
        assert_eq!(links.len(), 2);
        let appearing = links.iter().find(|l| l.target == 7).unwrap();
        assert_eq!(appearing.extension, 0.0);
        assert_eq!(appearing.change, Some(LinkChange::Appear));

        scene.advance(1.0);
        let links = scene.links();
        assert_eq!(links.iter().find(|l| l.target == 7).unwrap().extension, 1.0);
        assert_eq!(links.iter().find(|l| l.target == 5).unwrap().extension, 0.0);
    }

    #[test]
    fn teams_on_one_node_diff_links_independently() {
        let nodes = |links_1: &str, links_2: &str| {
            format!(
                r#""nodes":[{{"id":1,"x":0,"y":0,"ants":[
                                {{"team":1,"qt":2,"links":[{links_1}]}},
                                {{"team":2,"qt":2,"links":[{links_2}]}}]}},
                            {{"id":2,"x":4,"y":0}},{{"id":3,"x":0,"y":4}}]"#
            )
        };
        let mut scene = step(
            &format!("{{{TEAMS},{}}}", nodes("2", "3")),
            &format!("{{{TEAMS},{}}}", nodes("2,3", "")),
        );
        assert_eq!(scene.scheduler().count(GeneratorKind::OnNodeLink), 1);
        assert_eq!(scene.scheduler().count(GeneratorKind::OnNodeUnlink), 1);
        assert_eq!(scene.scheduler().count(GeneratorKind::NodeUpdate), 0);

        let state = |team, target, extension, change| LinkState {
            team,
            target,
            extension,
            change,
        };
        assert_eq!(
            scene.links(),
            vec![
                state(1, 2, 1.0, None),
                state(1, 3, 0.0, Some(LinkChange::Appear)),
                state(2, 3, 1.0, Some(LinkChange::Disappear)),
            ]
        );

        scene.advance(1.0);
        assert_eq!(
            scene.links(),
            vec![
                state(1, 2, 1.0, None),
                state(1, 3, 1.0, Some(LinkChange::Appear)),
                state(2, 3, 0.0, Some(LinkChange::Disappear)),
            ]
        );
    }

    #[test]
    fn transit_link_starts_at_moving_marker() {
        let nodes = r#""nodes":[{"id":1,"x":0,"y":0},{"id":2,"x":100,"y":0},
                                {"id":3,"x":0,"y":100}]"#;
        let edge = |progress: f32, links: &str| {
            format!(
                r#"{{{TEAMS},{nodes},"edges":[{{"ids":[1,2],
                    "groups":[{{"team":1,"qt":3,"progress":{progress},"links":[{links}]}}]}}]}}"#
            )
        };
        let mut scene = step(&edge(0.2, ""), &edge(0.6, "3"));
        assert_eq!(scene.scheduler().count(GeneratorKind::EdgeMovement), 1);
        assert_eq!(scene.scheduler().count(GeneratorKind::OnNodeLink), 1);
        assert_eq!(
            scene.links(),
            vec![LinkState {
                team: 1,
                target: 3,
                extension: 0.0,
                change: Some(LinkChange::Appear),
            }]
        );

        let key = EdgeKey::new(1, 2).unwrap();
        let link_line = |scene: &StepScene| {
            scene
                .draw_list()
                .into_iter()
                .find_map(|cmd| match cmd {
                    DrawCommand::Line {
                        from,
                        to,
                        dash: Some(_),
                        ..
                    } => Some((from, to)),
                    _ => None,
                })
                .unwrap()
        };

        let mut starts = Vec::new();
        for i in 0..=4 {
            scene.advance(i as f32 / 4.0);
            let (from, _) = link_line(&scene);
            assert_eq!(from, scene.marker(key, 0).unwrap().position);
            starts.push(from.x);
        }
        assert!(starts.windows(2).all(|pair| pair[0] < pair[1]), "{starts:?}");

        let (_, to) = link_line(&scene);
        assert_eq!(to, scene.layout().to_canvas(Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn static_step_registers_nothing() {
        let json = format!(
            r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,"type":"QUEEN","team":1,
                "ants":[{{"team":1,"qt":2,"links":[2]}}]}},{{"id":2,"x":3,"y":3}}],
                "edges":[{{"ids":[1,2],"life_ratio":0.5,
                           "groups":[{{"team":2,"qt":1,"progress":0.5}}]}}]}}"#
        );
        let mut scene = step(&json, &json);
        assert!(scene.scheduler().is_empty());

        let before = scene.draw_list();
        scene.advance(1.0);
        assert_eq!(before, scene.draw_list());
        assert_eq!(scene.links()[0].change, None);
    }

    #[test]
    fn score_and_food_updates() {
        let current = r##"{"teams":[{"id":1,"name":"A","color":"#ff0000","score":2}],
            "max_food":10,
            "nodes":[{"id":1,"x":0,"y":0,"type":"FOOD","food":10}]}"##;
        let next = r##"{"teams":[{"id":1,"name":"A","color":"#ff0000","score":6}],
            "max_food":10,
            "nodes":[{"id":1,"x":0,"y":0,"type":"FOOD","food":4}]}"##;
        let mut scene = step(current, next);
        assert_eq!(scene.scheduler().count(GeneratorKind::ScoreUpdate), 1);
        assert_eq!(scene.scheduler().count(GeneratorKind::FoodUpdate), 1);

        scene.advance(0.5);
        assert!((scene.score(1).unwrap() - 4.0).abs() < 1e-5);
        assert!((scene.food(1).unwrap() - 7.0).abs() < 1e-5);
        scene.advance(1.0);
        assert_eq!(scene.score(1), Some(6.0));
        assert_eq!(scene.food(1), Some(4.0));
    }

    #[test]
    fn dangling_references_are_skipped() {
        let json = format!(
            r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,
                "ants":[{{"team":9,"qt":2,"links":[2]}},{{"team":1,"qt":1,"links":[42]}}]}},
                {{"id":2,"x":1,"y":1}}],
                "edges":[{{"ids":[1,3],"groups":[{{"team":1,"qt":1,"progress":0.2}}]}}]}}"#
        );
        let scene = step(&json, &json);
        assert!(scene.links().is_empty());
        assert!(scene.marker(EdgeKey::new(1, 3).unwrap(), 0).is_none());
        let lines = scene
            .draw_list()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 0);
    }

    #[test]
    fn draw_list_shape_is_stable_across_progress() {
        let mut scene = step(
            &format!(
                r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,"type":"WATER",
                    "ants":[{{"team":1,"qt":1,"links":[2]}}]}},{{"id":2,"x":5,"y":1}}]}}"#
            ),
            &format!(
                r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,"type":"WATER",
                    "ants":[{{"team":2,"qt":4}}]}},{{"id":2,"x":5,"y":1}}]}}"#
            ),
        );
        let shapes = |scene: &StepScene| -> Vec<&'static str> {
            scene.draw_list().iter().map(DrawCommand::shape).collect()
        };
        let at_start = shapes(&scene);
        for i in 1..=10 {
            scene.advance(i as f32 / 10.0);
            assert_eq!(shapes(&scene), at_start);
        }
    }

    #[test]
    fn queen_and_legend_commands() {
        let json = format!(
            r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0,"type":"QUEEN","team":2}}]}}"#
        );
        let scene = step(&json, &json);
        let draw = scene.draw_list();

        let queen_arcs = draw
            .iter()
            .filter(|cmd| {
                matches!(cmd, DrawCommand::Arc { fill: None, stroke: Some(s), .. }
                    if s.color == Color::rgb(0.0, 0.0, 1.0))
            })
            .count();
        assert_eq!(queen_arcs, 4);

        let texts: Vec<_> = draw
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["A", "0", "B", "0"]);
    }

    #[test]
    fn legend_can_be_hidden() {
        let json = format!(r#"{{{TEAMS},"nodes":[{{"id":1,"x":0,"y":0}}]}}"#);
        let mut options = Options::default();
        options.display.show_team_legend = false;
        let scene = StepScene::build(&world(&json), &options, &Colorizer::default());
        assert!(scene
            .draw_list()
            .iter()
            .all(|cmd| !matches!(cmd, DrawCommand::Text { .. })));
    }
}
