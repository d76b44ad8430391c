use formats::GeoFeature;
use serde::Serialize;

pub const DEFAULT_FILL_COLOR: &str = "#3388ff";
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
pub const DEFAULT_STROKE_WEIGHT: f64 = 0.5;
pub const DEFAULT_FILL_OPACITY: f64 = 0.5;

/// Leaflet path options for one polygon feature. Field names serialize to
/// the option names Leaflet expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonStyle {
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "color")]
    pub stroke_color: String,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

impl PolygonStyle {
    /// `fill` and `stroke` properties override the default colours; the
    /// stroke weight comes from configuration and opacity is fixed.
    pub fn from_feature(feature: &GeoFeature, stroke_weight: f64) -> Self {
        Self {
            fill_color: feature
                .str_property_or("fill", DEFAULT_FILL_COLOR)
                .to_string(),
            stroke_color: feature
                .str_property_or("stroke", DEFAULT_STROKE_COLOR)
                .to_string(),
            stroke_weight,
            fill_opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_weight: DEFAULT_STROKE_WEIGHT,
            fill_opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

/// How polygon popups are presented. Passed through to the render sink.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    /// Properties shown in the popup, in order.
    pub fields: Vec<String>,
    /// Prefix each value with its field name.
    pub labels: bool,
    /// Format numeric values with the viewer's locale.
    pub localize: bool,
    pub sticky: bool,
    pub max_width: u32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            fields: vec!["name".to_string()],
            labels: false,
            localize: true,
            sticky: false,
            max_width: 300,
        }
    }
}
