use proj::{Proj, Transform};
use thiserror::Error;

use super::descriptor::{epsg_code_to_authority_string, CrsDescriptor, EpsgCode, WGS84_EPSG};
use crate::geofile::feature::{Feature, FeatureCollection};

#[derive(Debug, Error)]
pub enum CrsError {
    #[error("could not set up the {from} -> {to} transformation: {source}")]
    Setup {
        from: String,
        to: String,
        #[source]
        source: proj::ProjCreateError,
    },
    #[error("could not reproject a geometry from {from}: {source}")]
    Reproject {
        from: String,
        #[source]
        source: proj::ProjError,
    },
}

/// Bring a collection to geographic WGS84 (EPSG:4326).
///
/// A collection that declares no CRS, or one whose declaration carries no
/// recognizable EPSG code, is tagged EPSG:4326 without touching the
/// coordinates: the raw values are assumed to be geographic already, and
/// the assumption is logged instead of guessed around. Declared non-4326
/// codes are reprojected with PROJ.
pub fn normalize_to_wgs84(collection: FeatureCollection) -> Result<FeatureCollection, CrsError> {
    match collection.crs.clone() {
        None => {
            log::warn!("Collection declares no CRS; tagging EPSG:4326 without reprojecting");
            Ok(collection.with_crs(CrsDescriptor::wgs84()))
        }
        Some(crs) if crs.is_wgs84() => Ok(collection),
        Some(crs) => match crs.epsg() {
            Some(code) => reproject_to_wgs84(collection, code),
            None => {
                log::warn!(
                    "Collection declares unrecognized CRS '{}'; tagging EPSG:4326 without reprojecting",
                    crs
                );
                Ok(collection.with_crs(CrsDescriptor::wgs84()))
            }
        },
    }
}

fn reproject_to_wgs84(
    collection: FeatureCollection,
    source_code: EpsgCode,
) -> Result<FeatureCollection, CrsError> {
    let from = epsg_code_to_authority_string(source_code);
    let to = epsg_code_to_authority_string(WGS84_EPSG);
    log::info!(
        "Reprojecting {} features from {} to {}",
        collection.len(),
        from,
        to
    );
    let projection = Proj::new_known_crs(&from, &to, None).map_err(|source| CrsError::Setup {
        from: from.clone(),
        to,
        source,
    })?;
    let features = collection
        .features
        .into_iter()
        .map(|Feature { geometry, attributes }| {
            let geometry = match geometry {
                Some(geometry) => {
                    Some(geometry.transformed(&projection).map_err(|source| {
                        CrsError::Reproject {
                            from: from.clone(),
                            source,
                        }
                    })?)
                }
                None => None,
            };
            Ok(Feature {
                geometry,
                attributes,
            })
        })
        .collect::<Result<Vec<Feature>, CrsError>>()?;
    Ok(FeatureCollection::new(features, Some(CrsDescriptor::wgs84())))
}
