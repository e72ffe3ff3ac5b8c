use std::ops::Range;
use std::path::{Path, PathBuf};

use geo::BoundingRect;
use plotters::coord::{cartesian::Cartesian2d, types::RangedCoordf64};
use plotters::prelude::*;

use super::{RenderError, DATASET_LABEL};
use crate::geofile::feature::FeatureCollection;

/// Attribute holding the geomorphological unit name. Its presence in the
/// schema switches the static map to categorical styling.
pub const CATEGORY_FIELD: &str = "NOMEL_1";

pub const STATIC_MAP_FILENAME: &str = "mapa_geomorfologia_ibge.png";

const IMAGE_SIZE: (u32, u32) = (1024, 768);
const BOUNDS_PADDING: f64 = 0.05;

/// How the static map will be styled, decided from the schema alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticStyle {
    /// One color per distinct value of [`CATEGORY_FIELD`], in encounter
    /// order.
    Categorized { categories: Vec<String> },
    Uniform,
}

pub fn choose_style(collection: &FeatureCollection) -> StaticStyle {
    if !collection.has_field(CATEGORY_FIELD) {
        return StaticStyle::Uniform;
    }
    let mut categories: Vec<String> = Vec::new();
    for feature in &collection.features {
        if let Some(value) = feature.attributes.get(CATEGORY_FIELD) {
            let label = category_label(value);
            if !categories.contains(&label) {
                categories.push(label);
            }
        }
    }
    StaticStyle::Categorized { categories }
}

fn category_label(value: &geojson::JsonValue) -> String {
    match value {
        geojson::JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Draw the collection into a PNG under `output_dir` and return its path.
/// An empty collection still produces an image so the run leaves evidence
/// of what it saw.
pub fn render(collection: &FeatureCollection, output_dir: &Path) -> Result<PathBuf, RenderError> {
    let output_path = output_dir.join(STATIC_MAP_FILENAME);
    draw_map(collection, &output_path)?;
    log::info!("Static map written to {:?}", output_path);
    Ok(output_path)
}

fn draw_map(collection: &FeatureCollection, output_path: &Path) -> Result<(), RenderError> {
    let style = choose_style(collection);
    let title = match &style {
        StaticStyle::Categorized { .. } => format!("{} por {}", DATASET_LABEL, CATEGORY_FIELD),
        StaticStyle::Uniform => DATASET_LABEL.to_owned(),
    };
    let (x_range, y_range) = chart_bounds(collection);

    let root = BitMapBackend::new(output_path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::chart)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(&title, ("sans-serif", 28).into_font())
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(RenderError::chart)?;
    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()
        .map_err(RenderError::chart)?;

    match &style {
        StaticStyle::Categorized { categories } => {
            for (index, category) in categories.iter().enumerate() {
                let rings = category_rings(collection, category);
                draw_category(&mut chart, category, index, &rings)?;
            }
        }
        StaticStyle::Uniform => {
            let rings: Vec<Vec<(f64, f64)>> =
                collection.geometries().flat_map(exterior_rings).collect();
            draw_category(&mut chart, DATASET_LABEL, 0, &rings)?;
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(RenderError::chart)?;
    root.present().map_err(RenderError::chart)?;
    Ok(())
}

type MapChart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_category(
    chart: &mut MapChart,
    label: &str,
    index: usize,
    rings: &[Vec<(f64, f64)>],
) -> Result<(), RenderError> {
    let fill = Palette99::pick(index).mix(0.85);
    chart
        .draw_series(
            rings
                .iter()
                .map(|ring| Polygon::new(ring.clone(), fill.filled())),
        )
        .map_err(RenderError::chart)?
        .label(label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], fill.filled()));
    // Unit borders, drawn on top of the fills.
    chart
        .draw_series(
            rings
                .iter()
                .map(|ring| PathElement::new(closed_ring(ring), BLACK.stroke_width(1))),
        )
        .map_err(RenderError::chart)?;
    Ok(())
}

fn category_rings(collection: &FeatureCollection, category: &str) -> Vec<Vec<(f64, f64)>> {
    collection
        .features
        .iter()
        .filter(|feature| {
            feature
                .attributes
                .get(CATEGORY_FIELD)
                .map(|value| category_label(value) == category)
                .unwrap_or(false)
        })
        .filter_map(|feature| feature.geometry.as_ref())
        .flat_map(exterior_rings)
        .collect()
}

// Exterior rings only. TODO draw interior rings as holes once plotters can
// fill with an even-odd rule.
fn exterior_rings(geometry: &geo::Geometry) -> Vec<Vec<(f64, f64)>> {
    match geometry {
        geo::Geometry::Polygon(polygon) => vec![ring_coords(polygon.exterior())],
        geo::Geometry::MultiPolygon(multi) => multi
            .0
            .iter()
            .map(|polygon| ring_coords(polygon.exterior()))
            .collect(),
        _ => Vec::new(),
    }
}

fn ring_coords(ring: &geo::LineString) -> Vec<(f64, f64)> {
    ring.coords().map(|coord| (coord.x, coord.y)).collect()
}

fn closed_ring(ring: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut closed = ring.to_vec();
    if closed.first() != closed.last() {
        if let Some(first) = closed.first().copied() {
            closed.push(first);
        }
    }
    closed
}

/// Data envelope with a margin, or the whole world when nothing gives one.
fn chart_bounds(collection: &FeatureCollection) -> (Range<f64>, Range<f64>) {
    let mut envelope: Option<geo::Rect> = None;
    for geometry in collection.geometries() {
        if let Some(rect) = geometry.bounding_rect() {
            envelope = Some(match envelope {
                None => rect,
                Some(merged) => merge_rects(merged, rect),
            });
        }
    }
    match envelope {
        Some(rect) => {
            let pad_x = ((rect.max().x - rect.min().x) * BOUNDS_PADDING).max(0.1);
            let pad_y = ((rect.max().y - rect.min().y) * BOUNDS_PADDING).max(0.1);
            (
                rect.min().x - pad_x..rect.max().x + pad_x,
                rect.min().y - pad_y..rect.max().y + pad_y,
            )
        }
        None => (-180.0..180.0, -90.0..90.0),
    }
}

fn merge_rects(a: geo::Rect, b: geo::Rect) -> geo::Rect {
    geo::Rect::new(
        geo::Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        geo::Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}
