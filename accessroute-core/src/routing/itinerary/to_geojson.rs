use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{RouteDetails, RouteStep};
use crate::{Error, GraphStore};

impl RouteDetails {
    /// Converts the route to a `GeoJSON` `FeatureCollection` with one
    /// `LineString` per step.
    pub fn to_geojson(&self, graph: &GraphStore) -> Result<FeatureCollection, Error> {
        let features = self
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| create_step_feature(graph, idx, step))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, graph: &GraphStore) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(graph)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn create_step_feature(graph: &GraphStore, step_idx: usize, step: &RouteStep) -> Result<Feature, Error> {
    let coords = step
        .nodes
        .iter()
        .map(|&node| {
            graph
                .node(node)
                .map(|n| Coord { x: n.lon, y: n.lat })
                .ok_or(Error::InvalidNodeIndex(node))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "step_index": step_idx,
            "mode": step.mode.as_str(),
            "from_id": step.from_id,
            "to_id": step.to_id,
            "time_min": step.time_min,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
