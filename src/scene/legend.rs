//! Team legend placement.
//!
//! Team names and scores are pinned to the canvas border. Each anchor is a
//! unit direction (`-1`, `0` or `1` per axis, `y` up) that is scaled to the
//! canvas half-extents; the same direction doubles as the text alignment
//! offset so labels grow inward from the border.

use glam::Vec2;

use crate::util::color::Color;

use super::draw::DrawCommand;

/// Vertical distance between a team's name and its score.
const SCORE_GAP: f32 = 60.0;

/// Fixed border anchors for 2 to 8 teams, in team order. Other counts have
/// no legend.
#[must_use]
pub fn legend_anchors(team_count: usize) -> Vec<Vec2> {
    let table: &[[f32; 2]] = match team_count {
        2 => &[[-1.0, 1.0], [1.0, 1.0]],
        3 => &[[-1.0, 1.0], [1.0, 1.0], [0.0, -1.0]],
        4 => &[[-1.0, 1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]],
        5 => &[[-1.0, 1.0], [0.0, 1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]],
        6 => &[
            [-1.0, 1.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [-1.0, -1.0],
            [0.0, -1.0],
            [1.0, -1.0],
        ],
        7 => &[
            [-1.0, 1.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [-1.0, 0.0],
            [-1.0, -1.0],
            [0.0, -1.0],
            [1.0, -1.0],
        ],
        8 => &[
            [-1.0, 1.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [-1.0, 0.0],
            [-1.0, -1.0],
            [0.0, -1.0],
            [1.0, -1.0],
            [1.0, 0.0],
        ],
        _ => &[],
    };
    table.iter().map(|&xy| Vec2::from(xy)).collect()
}

/// Name and score labels for one team at `anchor`.
///
/// `half_extent` is half the canvas size. Canvas `y` points down, so the
/// anchor's `y` is flipped.
pub(crate) fn legend_entry(
    anchor: Vec2,
    half_extent: Vec2,
    name: &str,
    color: Color,
    score: f32,
) -> [DrawCommand; 2] {
    let position = anchor * Vec2::new(half_extent.x, -half_extent.y);
    let offset = anchor * Vec2::new(1.0, -1.0);
    let score_dir = if position.y > 0.0 { 1.0 } else { -1.0 };
    [
        DrawCommand::Text {
            position,
            offset,
            text: name.to_owned(),
            color,
        },
        DrawCommand::Text {
            position: position + Vec2::new(0.0, -SCORE_GAP * score_dir),
            offset,
            text: format!("{}", score.round().max(0.0)),
            color: Color::WHITE,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_counts() {
        assert!(legend_anchors(0).is_empty());
        assert!(legend_anchors(1).is_empty());
        assert!(legend_anchors(9).is_empty());
        for n in 2..=8 {
            assert_eq!(legend_anchors(n).len(), n);
        }
    }

    #[test]
    fn anchors_sit_on_border() {
        for n in 2..=8 {
            for a in legend_anchors(n) {
                assert!(a.x.abs() == 1.0 || a.y.abs() == 1.0, "{a} inside");
            }
        }
    }

    #[test]
    fn entry_places_name_and_score() {
        let [name, score] = legend_entry(
            Vec2::new(-1.0, 1.0),
            Vec2::new(960.0, 540.0),
            "red",
            Color::FOOD,
            12.6,
        );
        let DrawCommand::Text { position, text, .. } = name else {
            panic!("expected text");
        };
        assert_eq!(position, Vec2::new(-960.0, -540.0));
        assert_eq!(text, "red");

        let DrawCommand::Text { position, text, .. } = score else {
            panic!("expected text");
        };
        assert_eq!(text, "13");
        assert_eq!(position, Vec2::new(-960.0, -480.0));
    }
}
