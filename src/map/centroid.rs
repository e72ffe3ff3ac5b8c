use geo::Centroid;

use crate::geofile::feature::FeatureCollection;

/// Map center when no usable geometry exists: Brasília, as (latitude,
/// longitude).
pub const FALLBACK_CENTER: (f64, f64) = (-15.7801, -47.9292);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
    pub fallback: bool,
}

/// Unweighted mean of the per-feature centroids.
///
/// Features without a geometry, and degenerate geometries without a
/// centroid, do not contribute. When nothing contributes the fixed
/// fallback is returned and flagged.
pub fn map_center(collection: &FeatureCollection) -> MapCenter {
    let centroids: Vec<geo::Point> = collection
        .geometries()
        .filter_map(|geometry| geometry.centroid())
        .collect();
    if centroids.is_empty() {
        log::warn!(
            "No feature centroid available; centering the map on the fallback ({}, {})",
            FALLBACK_CENTER.0,
            FALLBACK_CENTER.1
        );
        return MapCenter {
            lat: FALLBACK_CENTER.0,
            lon: FALLBACK_CENTER.1,
            fallback: true,
        };
    }
    let count = centroids.len() as f64;
    MapCenter {
        lat: centroids.iter().map(|point| point.y()).sum::<f64>() / count,
        lon: centroids.iter().map(|point| point.x()).sum::<f64>() / count,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{map_center, FALLBACK_CENTER};
    use crate::geofile::feature::{Feature, FeatureCollection};

    fn feature(geometry: Option<geo::Geometry>) -> Feature {
        Feature {
            geometry,
            attributes: Default::default(),
        }
    }

    fn unit_square(origin: (f64, f64)) -> geo::Geometry {
        geo::Geometry::Polygon(geo::Polygon::new(
            geo::LineString::from(vec![
                origin,
                (origin.0 + 1.0, origin.1),
                (origin.0 + 1.0, origin.1 + 1.0),
                (origin.0, origin.1 + 1.0),
                origin,
            ]),
            vec![],
        ))
    }

    #[test]
    fn test_empty_collection_falls_back_to_brasilia() {
        let center = map_center(&FeatureCollection::new(Vec::new(), None));
        assert!(center.fallback);
        assert_eq!((center.lat, center.lon), FALLBACK_CENTER);
    }

    #[test]
    fn test_all_null_geometries_fall_back_to_brasilia() {
        let collection = FeatureCollection::new(vec![feature(None), feature(None)], None);
        let center = map_center(&collection);
        assert!(center.fallback);
        assert_eq!((center.lat, center.lon), FALLBACK_CENTER);
    }

    #[test]
    fn test_center_is_the_mean_of_feature_centroids() {
        // Unit squares centered at (0.5, 0.5) and (4.5, 2.5); the null
        // geometry contributes nothing.
        let collection = FeatureCollection::new(
            vec![
                feature(Some(unit_square((0.0, 0.0)))),
                feature(Some(unit_square((4.0, 2.0)))),
                feature(None),
            ],
            None,
        );
        let center = map_center(&collection);
        assert!(!center.fallback);
        assert_relative_eq!(center.lon, 2.5);
        assert_relative_eq!(center.lat, 1.5);
        // The mean never leaves the envelope of the contributing centroids.
        assert!(center.lon >= 0.5 && center.lon <= 4.5);
        assert!(center.lat >= 0.5 && center.lat <= 2.5);
    }
}
