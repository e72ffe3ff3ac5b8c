use std::fs;
use std::path::{Path, PathBuf};

use geojson::{GeoJson, JsonValue};

use super::centroid::MapCenter;
use super::html::LEAFLET_PAGE;
use super::{RenderError, DATASET_LABEL};
use crate::geofile::feature::{FeatureCollection, GEOMETRY_FIELD};
use crate::geofile::geojson::collection_to_geojson;

pub const INTERACTIVE_MAP_FILENAME: &str = "mapa_geomorfologia_ibge_interativo.html";

/// Wide enough to frame a national dataset.
pub const DEFAULT_ZOOM: u32 = 4;

/// Tooltip fields: the attribute schema in document order, minus the
/// geometry field.
pub fn tooltip_fields(collection: &FeatureCollection) -> Vec<&str> {
    collection
        .field_names()
        .iter()
        .map(String::as_str)
        .filter(|name| *name != GEOMETRY_FIELD)
        .collect()
}

/// Write the interactive map under `output_dir` and return its path. An
/// empty collection produces no file at all; the log line is the only
/// outcome.
pub fn render(
    collection: &FeatureCollection,
    center: &MapCenter,
    output_dir: &Path,
) -> Result<Option<PathBuf>, RenderError> {
    if collection.is_empty() {
        log::warn!("The dataset came back empty; skipping the interactive map");
        return Ok(None);
    }
    let output_path = output_dir.join(INTERACTIVE_MAP_FILENAME);
    let page = build_page(collection, center);
    fs::write(&output_path, page).map_err(|source| RenderError::Io {
        path: output_path.clone(),
        source,
    })?;
    log::info!("Interactive map written to {:?}", output_path);
    Ok(Some(output_path))
}

fn build_page(collection: &FeatureCollection, center: &MapCenter) -> String {
    let geojson = GeoJson::from(collection_to_geojson(collection)).to_string();
    let fields = JsonValue::from(tooltip_fields(collection)).to_string();
    // The payload-derived strings go in last so remote values can never
    // collide with a placeholder.
    LEAFLET_PAGE
        .replace("__CENTER_LAT__", &center.lat.to_string())
        .replace("__CENTER_LON__", &center.lon.to_string())
        .replace("__ZOOM__", &DEFAULT_ZOOM.to_string())
        .replace("__OVERLAY_NAME__", &JsonValue::from(DATASET_LABEL).to_string())
        .replace("__TOOLTIP_FIELDS__", &script_safe(&fields))
        .replace("__GEOJSON__", &script_safe(&geojson))
}

/// Embedded JSON comes from the remote service; "</" must not appear
/// verbatim inside the script block, whether in a value or a field name.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
