//! Fetch → assemble → render → save.

use std::path::PathBuf;

use anyhow::Context;
use feeds::{AircraftFeedAdapter, FeedClient, FeedError, FrontlineFeedAdapter};
use formats::{AircraftState, GeoFeature};
use layers::MapAssembler;
use render::{LeafletSink, RenderSink, render_scene};
use tracing::info;

use crate::config::MapConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub markers: usize,
    pub polygons: usize,
}

/// Fetches both feeds concurrently. Either failure fails the pair.
pub async fn fetch_layers<C>(
    client: &C,
    config: &MapConfig,
) -> Result<(Vec<GeoFeature>, Vec<AircraftState>), FeedError>
where
    C: FeedClient + Clone,
{
    let frontline = FrontlineFeedAdapter::new(client.clone(), &config.frontline_url);
    let aircraft = AircraftFeedAdapter::new(client.clone(), &config.aircraft_url);
    let bbox = config.bounds();

    let aircraft_states = async {
        if config.include_aircraft {
            aircraft.fetch_aircraft(bbox).await
        } else {
            info!("aircraft feed disabled");
            Ok(Vec::new())
        }
    };

    tokio::try_join!(frontline.fetch_frontline_features(), aircraft_states)
}

/// Runs the whole pipeline. Nothing is written unless every step before
/// the save succeeds.
pub async fn run<C>(client: &C, config: &MapConfig) -> anyhow::Result<RunSummary>
where
    C: FeedClient + Clone,
{
    let (features, aircraft) = fetch_layers(client, config)
        .await
        .context("fetching map layers")?;

    let scene = MapAssembler::new(config.assembler()).assemble(features, &aircraft);

    let sink = LeafletSink::new(config.title.clone());
    let canvas = render_scene(&sink, &config.view(), &scene).context("rendering map")?;
    sink.save_artifact(&canvas, &config.output)
        .with_context(|| format!("saving {}", config.output.display()))?;

    let summary = RunSummary {
        output: config.output.clone(),
        markers: scene.marker_count(),
        polygons: scene.polygon_count(),
    };
    info!(
        path = %summary.output.display(),
        markers = summary.markers,
        polygons = summary.polygons,
        "run complete"
    );
    Ok(summary)
}
