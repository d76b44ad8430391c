use formats::{AircraftState, GeoFeature, Geometry};
use foundation::LatLon;
use serde_json::Value;
use thiserror::Error;

/// Separates the primary and translated label in a unit name.
pub const LABEL_DELIMITER: &str = "///";

/// Track headings are clockwise from north, but the plane glyph points east
/// when unrotated.
pub const GLYPH_HEADING_OFFSET_DEG: f64 = -90.0;

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    /// The renderer's stock pin.
    Default,
    /// A text glyph drawn in a div, rotated by the marker's rotation.
    Glyph {
        glyph: String,
        font_size_px: u32,
        color: String,
    },
}

impl MarkerIcon {
    pub fn plane() -> Self {
        MarkerIcon::Glyph {
            glyph: "✈".to_string(),
            font_size_px: 24,
            color: "#2c54aa".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLon,
    pub label: String,
    pub icon_rotation_deg: Option<f64>,
    pub icon: MarkerIcon,
}

impl MarkerSpec {
    pub fn new(position: LatLon, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
            icon_rotation_deg: None,
            icon: MarkerIcon::Default,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarkerError {
    #[error("feature has no `name` property")]
    MissingLabel,
    #[error("expected a Point geometry, got {0}")]
    NotAPoint(String),
}

/// `"A///B"` becomes `"A - B"`; a name without the delimiter is used as is.
/// Parts after the second are dropped.
pub fn marker_label(name: &str) -> String {
    let mut parts = name.split(LABEL_DELIMITER);
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) => format!("{first} - {second}"),
        None => first.to_string(),
    }
}

pub fn frontline_marker(feature: &GeoFeature) -> Result<MarkerSpec, MarkerError> {
    let Geometry::Point(position) = feature.geometry else {
        return Err(MarkerError::NotAPoint(
            feature.geometry.type_name().to_string(),
        ));
    };

    let name = match feature.property("name") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(MarkerError::MissingLabel),
    };

    Ok(MarkerSpec::new(position, marker_label(&name)))
}

pub fn aircraft_marker(state: &AircraftState) -> MarkerSpec {
    MarkerSpec {
        position: state.position,
        label: format!(
            "{}-{}-{}",
            state.icao24, state.callsign, state.origin_country
        ),
        icon_rotation_deg: Some(state.true_track_deg + GLYPH_HEADING_OFFSET_DEG),
        icon: MarkerIcon::plane(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn point(props: Value) -> GeoFeature {
        GeoFeature::new(
            Geometry::Point(LatLon::from_lon_lat(30.0, 50.0)),
            props.as_object().cloned().unwrap(),
        )
    }

    fn aircraft(track: f64) -> AircraftState {
        AircraftState {
            icao24: "508035".to_string(),
            callsign: "UKR101".to_string(),
            origin_country: "Ukraine".to_string(),
            position: LatLon::new(50.4, 30.5),
            true_track_deg: track,
        }
    }

    #[test]
    fn label_joins_primary_and_secondary() {
        assert_eq!(marker_label("А///B"), "А - B");
        assert_eq!(marker_label("single"), "single");
        assert_eq!(marker_label("a///b///c"), "a - b");
        assert_eq!(marker_label("a///"), "a - ");
        assert_eq!(marker_label(""), "");
    }

    #[test]
    fn frontline_marker_swaps_to_lat_lon() {
        let marker = frontline_marker(&point(json!({ "name": "А///B" }))).expect("marker");
        assert_eq!(marker, MarkerSpec::new(LatLon::new(50.0, 30.0), "А - B"));
    }

    #[test]
    fn frontline_marker_requires_a_name() {
        assert_eq!(
            frontline_marker(&point(json!({}))),
            Err(MarkerError::MissingLabel)
        );
        assert_eq!(
            frontline_marker(&point(json!({ "name": null }))),
            Err(MarkerError::MissingLabel)
        );
        assert_eq!(
            frontline_marker(&point(json!({ "name": 12 }))).map(|m| m.label),
            Ok("12".to_string())
        );
    }

    #[test]
    fn frontline_marker_rejects_polygons() {
        let polygon = GeoFeature::new(Geometry::Polygon(vec![]), Default::default());
        assert_eq!(
            frontline_marker(&polygon),
            Err(MarkerError::NotAPoint("Polygon".to_string()))
        );
    }

    #[test]
    fn aircraft_rotation_is_corrected_for_the_glyph() {
        assert_eq!(aircraft_marker(&aircraft(90.0)).icon_rotation_deg, Some(0.0));
        assert_eq!(aircraft_marker(&aircraft(0.0)).icon_rotation_deg, Some(-90.0));
    }

    #[test]
    fn aircraft_marker_label_and_icon() {
        let marker = aircraft_marker(&aircraft(180.0));
        assert_eq!(marker.label, "508035-UKR101-Ukraine");
        assert_eq!(marker.position, LatLon::new(50.4, 30.5));
        assert_eq!(marker.icon, MarkerIcon::plane());
    }
}
