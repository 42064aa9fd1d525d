//! GeoJSON export of route results for the rendering layer

use geojson::{Feature, Geometry, GeometryValue};
use serde_json::json;

use super::route::{OriginKind, RouteResult};
use crate::Error;

impl RouteResult {
    /// Converts the route to a GeoJSON `Feature` with a `LineString` geometry
    /// and the total distance and origin kind as properties.
    pub fn to_geojson(&self) -> Feature {
        let geometry = Geometry::new(GeometryValue::from(&self.polyline));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "total_distance_m".to_string(),
            json!(self.total_distance_m),
        );
        let origin = match &self.origin {
            OriginKind::Snapped => json!("snapped"),
            OriginKind::InsideBuilding(building) => json!({ "inside_building": building }),
        };
        properties.insert("origin".to_string(), origin);

        Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Serialized form of [`RouteResult::to_geojson`].
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()).map_err(Error::from)
    }
}
