//! World model: normalized, immutable per-step snapshots.
//!
//! A [`WorldSnapshot`] is built fresh from a [`RawSnapshot`] for every
//! simulation step. Teams and nodes keep their load order (the population
//! ring relies on a stable team order), edges are keyed by a canonical
//! unordered node pair, and every next-state field needed for interpolation
//! lives directly on the entity it animates.

mod edges;
mod model;
mod next;
pub mod raw;

pub use edges::{Edge, EdgeKey, EdgeSet};
pub use model::{
    AntGroup, DanglingRef, GroupLocation, Node, NodeKind, Team, TransitGroup,
    WorldSnapshot,
};
pub use raw::RawSnapshot;

/// Node identifier as it appears in snapshots.
pub type NodeId = u32;

/// Team identifier as it appears in snapshots.
pub type TeamId = u32;
