//! Spatial lookup of graph nodes by coordinate

use geo::{Distance, Haversine};
use rstar::{RTree, primitives::GeomWithData};

use super::Node;
use crate::NodeIndex;

type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// R-tree over node positions, stored as `[lon, lat]`
#[derive(Debug, Clone)]
pub struct NodeLocator {
    tree: RTree<IndexedPoint>,
}

impl NodeLocator {
    pub fn new(nodes: &[Node]) -> Self {
        let points = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| IndexedPoint::new([node.lon, node.lat], idx))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Closest node to (`lat`, `lon`) and its haversine distance in meters
    pub fn nearest(&self, nodes: &[Node], lat: f64, lon: f64) -> Option<(NodeIndex, f64)> {
        let hit = self.tree.nearest_neighbor(&[lon, lat])?;
        let node = nodes.get(hit.data)?;
        let meters = Haversine.distance(node.geometry(), geo::Point::new(lon, lat));
        Some((hit.data, meters))
    }
}
