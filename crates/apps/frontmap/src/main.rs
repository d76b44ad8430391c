mod config;
mod pipeline;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use feeds::HttpFeedClient;
use foundation::GeoBounds;
use render::TileStyle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::MapConfig;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Render the battlefront and live aircraft onto an HTML map")]
struct Args {
    /// JSON config file; flags and FRONTMAP_* variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Battlefront history endpoint
    #[arg(long)]
    frontline_url: Option<String>,

    /// Aircraft state-vector endpoint
    #[arg(long)]
    aircraft_url: Option<String>,

    /// Aircraft query box: latMin,latMax,lonMin,lonMax
    #[arg(long, value_parser = GeoBounds::parse)]
    bbox: Option<GeoBounds>,

    /// Polygon border width (0 hides borders)
    #[arg(long)]
    stroke_weight: Option<f64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Output HTML file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Initial zoom level
    #[arg(long)]
    zoom: Option<u8>,

    /// Base tiles: cartodb-dark-matter, cartodb-positron, open-street-map
    #[arg(long)]
    tiles: Option<TileStyle>,

    /// Skip the aircraft feed
    #[arg(long)]
    no_aircraft: bool,

    /// Page title
    #[arg(long)]
    title: Option<String>,
}

impl Args {
    fn apply(self, config: &mut MapConfig) {
        if let Some(url) = self.frontline_url {
            config.frontline_url = url;
        }
        if let Some(url) = self.aircraft_url {
            config.aircraft_url = url;
        }
        if let Some(bbox) = self.bbox {
            config.bbox = bbox.into();
        }
        if let Some(weight) = self.stroke_weight {
            config.stroke_weight = weight;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(zoom) = self.zoom {
            config.zoom = zoom;
        }
        if let Some(tiles) = self.tiles {
            config.tiles = tiles;
        }
        if self.no_aircraft {
            config.include_aircraft = false;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
    }
}

fn resolve_config(args: Args) -> anyhow::Result<MapConfig> {
    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    config.apply_env(|key| env::var(key).ok())?;
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}

async fn real_main() -> anyhow::Result<()> {
    let config = resolve_config(Args::parse())?;
    info!(
        frontline = %config.frontline_url,
        aircraft = %config.aircraft_url,
        output = %config.output.display(),
        "starting"
    );

    let client = HttpFeedClient::new(config.timeout()).context("building HTTP client")?;
    pipeline::run(&client, &config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match real_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "run failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
