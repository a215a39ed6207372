//! Pairing a snapshot with the one that follows it.
//!
//! Producers may inline next-state values (`nextAnts`, `anim.progress`, ...)
//! or leave them out. [`WorldSnapshot::with_next`] fills every next-state
//! field the input did not provide from the following snapshot, so the
//! scene builder only ever looks at one snapshot.

use super::model::{TransitGroup, WorldSnapshot};

impl WorldSnapshot {
    /// Fill missing next-state fields from `next`.
    ///
    /// Teams and nodes are matched by id. Transit groups are matched on the
    /// same edge and team, closest progress first, so a group that left the
    /// edge does not hand its successor to a neighbour. Inline values
    /// always win.
    #[must_use]
    pub fn with_next(mut self, next: &WorldSnapshot) -> Self {
        for team in &mut self.teams {
            if team.next_score.is_none() {
                team.next_score = next.team(team.id).map(|t| t.score);
            }
        }

        for node in &mut self.nodes {
            let Some(upcoming) = next.node(node.id) else {
                continue;
            };
            if node.next_ants.is_none() {
                node.next_ants = Some(upcoming.ants.clone());
            }
            if node.next_food.is_none() && node.kind == upcoming.kind {
                node.next_food = Some(upcoming.food);
            }
        }

        for edge in self.edges.iter_mut() {
            let Some(upcoming) = next.edges().get_key(&edge.key) else {
                continue;
            };
            pair_transit_groups(&mut edge.groups, &upcoming.groups);
        }

        self
    }
}

/// Pair each group with the unclaimed same-team group in `next` whose
/// progress is nearest to where it is expected to be (its inline target,
/// else where it stands now). Ties go to the earlier group.
fn pair_transit_groups(current: &mut [TransitGroup], next: &[TransitGroup]) {
    let mut candidates: Vec<(f32, usize, usize)> = Vec::new();
    for (i, group) in current.iter().enumerate() {
        let expected = group.next_progress.unwrap_or(group.progress);
        for (j, upcoming) in next.iter().enumerate() {
            if upcoming.team == group.team {
                candidates.push(((upcoming.progress - expected).abs(), i, j));
            }
        }
    }
    candidates.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let mut claimed_current = vec![false; current.len()];
    let mut claimed_next = vec![false; next.len()];
    for (_, i, j) in candidates {
        if claimed_current[i] || claimed_next[j] {
            continue;
        }
        claimed_current[i] = true;
        claimed_next[j] = true;

        let (group, matched) = (&mut current[i], &next[j]);
        if group.next_progress.is_none() {
            group.next_progress = Some(matched.progress);
        }
        if group.next_links.is_none() {
            group.next_links = Some(matched.links.clone());
        }
    }
}
