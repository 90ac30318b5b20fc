pub mod dijkstra;
pub mod path;

use crate::collections::FxIndexMap;

/// Distance in unit moves from the start cell
pub type Distance = u32;

/// Parent index stored for the start node, which has no predecessor
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Type alias for the node map used by the search engine
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the best known cost to reach this node from the start
/// A node missing from the map has an infinite cost
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;
