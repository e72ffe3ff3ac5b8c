use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::crs::normalize::{normalize_to_wgs84, CrsError};
use crate::geofile::feature::FeatureCollection;
use crate::map::centroid::{map_center, MapCenter};
use crate::map::{interactive, static_map, RenderError};
use crate::wfs::download::{fetch_feature_collection, FetchError};
use crate::wfs::request::get_feature_url;
use crate::Config;

/// First failure wins; the variant tells which stage gave up.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetching the feature collection failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("normalizing the coordinate reference system failed: {0}")]
    Crs(#[from] CrsError),
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug)]
pub struct PipelineSummary {
    pub feature_count: usize,
    pub static_map: PathBuf,
    pub interactive_map: Option<PathBuf>,
    pub center: MapCenter,
}

/// Fetch, normalize and render, aborting on the first failure.
pub fn run(config: &Config) -> Result<PipelineSummary, PipelineError> {
    let url = get_feature_url(&config.wfs);
    log::info!("Requesting features from {}", url);
    let fetched = fetch_feature_collection(&url, config.tls)?;
    render_collection(fetched, &config.output_dir)
}

fn render_collection(
    fetched: FeatureCollection,
    output_dir: &Path,
) -> Result<PipelineSummary, PipelineError> {
    log::info!(
        "Fetched {} features ({} without geometry); declared CRS: {}",
        fetched.len(),
        fetched.null_geometry_count(),
        fetched
            .crs
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "none".to_owned()),
    );
    let collection = normalize_to_wgs84(fetched)?;
    log::info!("Rendering the static map");
    let static_map = static_map::render(&collection, output_dir)?;
    let center = map_center(&collection);
    log::info!(
        "Rendering the interactive map centered at ({:.4}, {:.4})",
        center.lat,
        center.lon
    );
    let interactive_map = interactive::render(&collection, &center, output_dir)?;
    Ok(PipelineSummary {
        feature_count: collection.len(),
        static_map,
        interactive_map,
        center,
    })
}
