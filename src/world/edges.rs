//! Canonical edge identity and the edge collection.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::model::TransitGroup;
use super::NodeId;

/// Unordered node pair, stored lower id first so an edge and its reverse
/// are the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Canonical key for the pair, or `None` for a self-loop.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Endpoint at progress 0.
    #[must_use]
    pub fn low(&self) -> NodeId {
        self.low
    }

    /// Endpoint at progress 1.
    #[must_use]
    pub fn high(&self) -> NodeId {
        self.high
    }

    /// Both endpoints, lower first.
    #[must_use]
    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.low, self.high]
    }
}

/// Edge between two nodes with its in-transit ant groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Canonical endpoint pair.
    pub key: EdgeKey,
    /// Structural integrity in [0, 1].
    pub life_ratio: f32,
    /// Groups travelling along the edge, in input order.
    pub groups: Vec<TransitGroup>,
}

/// Edge collection addressable by unordered endpoint pair.
///
/// Iteration follows first-insertion order; a later record for the same
/// pair replaces the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSet {
    edges: Vec<Edge>,
    index: FxHashMap<EdgeKey, usize>,
}

impl EdgeSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, replacing any edge with the same canonical key.
    /// Returns the replaced edge.
    pub fn insert(&mut self, edge: Edge) -> Option<Edge> {
        if let Some(&slot) = self.index.get(&edge.key) {
            return Some(std::mem::replace(&mut self.edges[slot], edge));
        }
        let _ = self.index.insert(edge.key, self.edges.len());
        self.edges.push(edge);
        None
    }

    /// Edge between `a` and `b`, in either order.
    #[must_use]
    pub fn get(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        EdgeKey::new(a, b).and_then(|key| self.get_key(&key))
    }

    /// Edge by canonical key.
    #[must_use]
    pub fn get_key(&self, key: &EdgeKey) -> Option<&Edge> {
        self.index.get(key).map(|&slot| &self.edges[slot])
    }

    /// All edges, unordered-set view (insertion order).
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Edge> {
        self.edges.iter_mut()
    }

    /// Edges sorted by ascending life ratio; ties keep insertion order.
    #[must_use]
    pub fn by_life_ratio(&self) -> Vec<&Edge> {
        let mut sorted: Vec<&Edge> = self.edges.iter().collect();
        sorted.sort_by(|a, b| a.life_ratio.total_cmp(&b.life_ratio));
        sorted
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the set holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: NodeId, b: NodeId, life_ratio: f32) -> Edge {
        Edge {
            key: EdgeKey::new(a, b).unwrap(),
            life_ratio,
            groups: Vec::new(),
        }
    }

    #[test]
    fn key_is_order_insensitive() {
        assert_eq!(EdgeKey::new(7, 2), EdgeKey::new(2, 7));
        let key = EdgeKey::new(7, 2).unwrap();
        assert_eq!(key.endpoints(), [2, 7]);
        assert_eq!(EdgeKey::new(3, 3), None);
    }

    #[test]
    fn reverse_insert_replaces_in_place() {
        let mut set = EdgeSet::new();
        assert!(set.insert(edge(1, 2, 0.3)).is_none());
        assert!(set.insert(edge(4, 3, 0.1)).is_none());
        let replaced = set.insert(edge(2, 1, 0.9)).unwrap();
        assert_eq!(replaced.life_ratio, 0.3);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1, 2).unwrap().life_ratio, 0.9);
        assert_eq!(set.iter().next().unwrap().key, EdgeKey::new(1, 2).unwrap());
    }

    #[test]
    fn life_ratio_order_is_ascending_and_stable() {
        let mut set = EdgeSet::new();
        let _ = set.insert(edge(1, 2, 0.5));
        let _ = set.insert(edge(2, 3, 0.1));
        let _ = set.insert(edge(3, 4, 0.5));
        let _ = set.insert(edge(4, 5, 0.0));
        let order: Vec<[NodeId; 2]> = set
            .by_life_ratio()
            .iter()
            .map(|e| e.key.endpoints())
            .collect();
        assert_eq!(order, vec![[4, 5], [2, 3], [1, 2], [3, 4]]);
    }
}
