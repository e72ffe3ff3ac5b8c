use geojson::{GeoJson, JsonObject};

use super::feature::{Feature, FeatureCollection};
use crate::crs::descriptor::CrsDescriptor;

/// Materialize a parsed GeoJSON document into the in-memory model.
///
/// The document must be a feature collection. The legacy `crs` member,
/// when present, becomes the collection's CRS descriptor. A feature with a
/// null geometry stays in the collection with `geometry: None` so its
/// attributes survive.
pub fn collection_from_geojson(raw: GeoJson) -> Result<FeatureCollection, geojson::Error> {
    let parsed = geojson::FeatureCollection::try_from(raw)?;
    let crs = CrsDescriptor::from_foreign_members(parsed.foreign_members.as_ref());
    let features = parsed
        .features
        .into_iter()
        .map(feature_from_geojson)
        .collect::<Result<Vec<Feature>, geojson::Error>>()?;
    Ok(FeatureCollection::new(features, crs))
}

fn feature_from_geojson(feature: geojson::Feature) -> Result<Feature, geojson::Error> {
    let geometry = match feature.geometry {
        Some(geometry) => Some(geo::Geometry::try_from(geometry.value)?),
        None => None,
    };
    Ok(Feature {
        geometry,
        attributes: feature.properties.unwrap_or_else(JsonObject::new),
    })
}

/// Back to the interchange form, for embedding in the interactive page.
/// Null geometries stay null so attribute-only records keep their tooltip
/// data.
pub fn collection_to_geojson(collection: &FeatureCollection) -> geojson::FeatureCollection {
    let features = collection
        .features
        .iter()
        .map(|feature| geojson::Feature {
            bbox: None,
            geometry: feature
                .geometry
                .as_ref()
                .map(|geometry| geojson::Geometry::new(geojson::Value::from(geometry))),
            id: None,
            properties: Some(feature.attributes.clone()),
            foreign_members: None,
        })
        .collect();
    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use geojson::{GeoJson, JsonValue};

    use super::{collection_from_geojson, collection_to_geojson};

    const WFS_PAYLOAD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-47.0, -15.0], [-46.0, -15.0], [-46.0, -16.0], [-47.0, -15.0]]]
                },
                "properties": {"NOMEL_1": "Planalto Central", "AREA_KM2": 1032.5}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"NOMEL_1": "Sem geometria", "AREA_KM2": null}
            }
        ],
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::4674"}}
    }"#;

    #[test]
    fn test_collection_from_a_wfs_payload() {
        let raw: GeoJson = WFS_PAYLOAD.parse().unwrap();
        let collection = collection_from_geojson(raw).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.null_geometry_count(), 1);
        assert_eq!(collection.crs.as_ref().unwrap().epsg(), Some(4674));
        let fields: Vec<&str> = collection.field_names().iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["NOMEL_1", "AREA_KM2"]);
    }

    #[test]
    fn test_missing_crs_member_leaves_the_descriptor_unset() {
        let raw: GeoJson = r#"{"type": "FeatureCollection", "features": []}"#.parse().unwrap();
        let collection = collection_from_geojson(raw).unwrap();
        assert!(collection.crs.is_none());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_non_collection_payload_is_an_error() {
        let raw: GeoJson = r#"{"type": "Feature", "geometry": null, "properties": {}}"#
            .parse()
            .unwrap();
        assert!(collection_from_geojson(raw).is_err());
    }

    #[test]
    fn test_interchange_keeps_properties_and_null_geometries() {
        let raw: GeoJson = WFS_PAYLOAD.parse().unwrap();
        let collection = collection_from_geojson(raw).unwrap();
        let interchange = collection_to_geojson(&collection);
        assert_eq!(interchange.features.len(), 2);
        assert!(interchange.features[0].geometry.is_some());
        assert!(interchange.features[1].geometry.is_none());
        let properties = interchange.features[0].properties.as_ref().unwrap();
        assert_eq!(
            properties.get("NOMEL_1"),
            Some(&JsonValue::from("Planalto Central"))
        );
    }
}
