use std::path::{Path, PathBuf};

use layers::{DrawCommand, MapScene, MarkerSpec, PopupConfig, StyledPolygonCollection};
use thiserror::Error;

use crate::view::MapView;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode map data: {0}")]
    Encode(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Contract of the mapping backend. The assembler never depends on how a
/// sink draws, only on these operations.
pub trait RenderSink {
    type Canvas;

    fn create_canvas(&self, view: &MapView) -> Self::Canvas;

    fn add_marker(&self, canvas: &mut Self::Canvas, marker: &MarkerSpec)
    -> Result<(), RenderError>;

    fn add_styled_feature_collection(
        &self,
        canvas: &mut Self::Canvas,
        collection: &StyledPolygonCollection,
        popup: &PopupConfig,
    ) -> Result<(), RenderError>;

    fn save_artifact(&self, canvas: &Self::Canvas, path: &Path) -> Result<(), RenderError>;
}

/// Replays `scene` onto a fresh canvas, in command order.
pub fn render_scene<S: RenderSink>(
    sink: &S,
    view: &MapView,
    scene: &MapScene,
) -> Result<S::Canvas, RenderError> {
    let mut canvas = sink.create_canvas(view);
    for command in &scene.commands {
        match command {
            DrawCommand::AddMarker(marker) => sink.add_marker(&mut canvas, marker)?,
            DrawCommand::AddStyledFeatureCollection { collection, popup } => {
                sink.add_styled_feature_collection(&mut canvas, collection, popup)?
            }
        }
    }
    Ok(canvas)
}
