use formats::GeoFeature;
use serde_json::{Map, Value};

use crate::symbology::PolygonStyle;

pub const DEFAULT_POLYGON_LAYER_NAME: &str = "Colored Polygons";

#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    pub feature: GeoFeature,
    pub style: PolygonStyle,
}

/// Non-point frontline features with their computed styles.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledPolygonCollection {
    pub name: String,
    pub features: Vec<StyledFeature>,
}

impl StyledPolygonCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    /// Adds a feature styled from its own properties. Point features are
    /// ignored; they are rendered as markers instead.
    pub fn push(&mut self, feature: GeoFeature, stroke_weight: f64) -> bool {
        if feature.geometry.is_point() {
            return false;
        }
        let style = PolygonStyle::from_feature(&feature, stroke_weight);
        self.features.push(StyledFeature { feature, style });
        true
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Plain geojson `FeatureCollection` of the contained features.
    pub fn to_feature_collection(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );
        root.insert(
            "features".to_string(),
            Value::Array(
                self.features
                    .iter()
                    .map(|f| f.feature.to_geojson_value())
                    .collect(),
            ),
        );
        Value::Object(root)
    }
}

impl Default for StyledPolygonCollection {
    fn default() -> Self {
        Self::new(DEFAULT_POLYGON_LAYER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::Geometry;
    use foundation::LatLon;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn feature(geometry: Geometry, props: Value) -> GeoFeature {
        GeoFeature::new(geometry, props.as_object().cloned().unwrap())
    }

    #[test]
    fn push_skips_points() {
        let mut c = StyledPolygonCollection::default();
        assert!(!c.push(
            feature(Geometry::Point(LatLon::new(1.0, 2.0)), json!({})),
            0.5
        ));
        assert!(c.push(
            feature(Geometry::MultiPolygon(vec![]), json!({ "fill": "#a00" })),
            0.5
        ));
        assert_eq!(c.len(), 1);
        assert_eq!(c.features[0].style.fill_color, "#a00");
    }

    #[test]
    fn feature_collection_shape() {
        let mut c = StyledPolygonCollection::default();
        c.push(
            feature(
                Geometry::LineString(vec![LatLon::new(50.0, 30.0), LatLon::new(51.0, 31.0)]),
                json!({ "name": "line" }),
            ),
            0.0,
        );
        assert_eq!(
            c.to_feature_collection(),
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": { "name": "line" },
                    "geometry": { "type": "LineString", "coordinates": [[30.0, 50.0], [31.0, 51.0]] }
                }]
            })
        );
    }
}
