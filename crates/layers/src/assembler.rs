use formats::{AircraftState, GeoFeature};
use tracing::{debug, warn};

use crate::marker::{MarkerSpec, aircraft_marker, frontline_marker};
use crate::polygons::{DEFAULT_POLYGON_LAYER_NAME, StyledPolygonCollection};
use crate::scene::{DrawCommand, MapScene};
use crate::symbology::{DEFAULT_STROKE_WEIGHT, PopupConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerConfig {
    /// Polygon border width. `0.0` hides borders entirely.
    pub stroke_weight: f64,
    pub polygon_layer_name: String,
    pub popup: PopupConfig,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            stroke_weight: DEFAULT_STROKE_WEIGHT,
            polygon_layer_name: DEFAULT_POLYGON_LAYER_NAME.to_string(),
            popup: PopupConfig::default(),
        }
    }
}

/// Frontline output: unit markers plus the styled area collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontlineLayers {
    pub markers: Vec<MarkerSpec>,
    pub polygons: StyledPolygonCollection,
}

/// Turns decoded feed records into draw commands.
#[derive(Debug, Clone, Default)]
pub struct MapAssembler {
    config: AssemblerConfig,
}

impl MapAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Point features become markers; everything else goes into the polygon
    /// collection. Points without a usable name are skipped.
    pub fn assemble_frontline(&self, features: Vec<GeoFeature>) -> FrontlineLayers {
        let mut markers = Vec::new();
        let mut polygons = StyledPolygonCollection::new(self.config.polygon_layer_name.clone());

        for (index, feature) in features.into_iter().enumerate() {
            if !feature.geometry.is_point() {
                polygons.push(feature, self.config.stroke_weight);
                continue;
            }
            match frontline_marker(&feature) {
                Ok(marker) => markers.push(marker),
                Err(err) => warn!(index, error = %err, "skipping frontline marker"),
            }
        }

        FrontlineLayers { markers, polygons }
    }

    pub fn assemble_aircraft(&self, states: &[AircraftState]) -> Vec<MarkerSpec> {
        states.iter().map(aircraft_marker).collect()
    }

    /// Frontline markers first, then the polygon layer, then aircraft.
    pub fn assemble(&self, features: Vec<GeoFeature>, aircraft: &[AircraftState]) -> MapScene {
        let frontline = self.assemble_frontline(features);
        let aircraft = self.assemble_aircraft(aircraft);

        let mut scene = MapScene {
            commands: Vec::with_capacity(frontline.markers.len() + aircraft.len() + 1),
        };
        scene
            .commands
            .extend(frontline.markers.into_iter().map(DrawCommand::AddMarker));
        scene.commands.push(DrawCommand::AddStyledFeatureCollection {
            collection: frontline.polygons,
            popup: self.config.popup.clone(),
        });
        scene
            .commands
            .extend(aircraft.into_iter().map(DrawCommand::AddMarker));

        debug!(
            markers = scene.marker_count(),
            polygons = scene.polygon_count(),
            "scene assembled"
        );
        scene
    }
}
