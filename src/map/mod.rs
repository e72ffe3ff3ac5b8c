pub mod centroid;
pub mod html;
pub mod interactive;
pub mod static_map;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Display name of the rendered dataset, shared by the static map title
/// and the interactive overlay toggle.
pub const DATASET_LABEL: &str = "Geomorfologia IBGE";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not draw the map: {0}")]
    Chart(String),
    #[error("could not write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub(crate) fn chart(err: impl fmt::Display) -> Self {
        Self::Chart(err.to_string())
    }
}
