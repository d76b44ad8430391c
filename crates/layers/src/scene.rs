use crate::marker::MarkerSpec;
use crate::polygons::StyledPolygonCollection;
use crate::symbology::PopupConfig;

/// A renderer-agnostic instruction for the render sink.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    AddMarker(MarkerSpec),
    AddStyledFeatureCollection {
        collection: StyledPolygonCollection,
        popup: PopupConfig,
    },
}

/// Ordered draw commands for one map. Later commands draw on top.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapScene {
    pub commands: Vec<DrawCommand>,
}

impl MapScene {
    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::AddMarker(m) => Some(m),
            DrawCommand::AddStyledFeatureCollection { .. } => None,
        })
    }

    pub fn collections(&self) -> impl Iterator<Item = &StyledPolygonCollection> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::AddStyledFeatureCollection { collection, .. } => Some(collection),
            DrawCommand::AddMarker(_) => None,
        })
    }

    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    pub fn polygon_count(&self) -> usize {
        self.collections().map(StyledPolygonCollection::len).sum()
    }
}
