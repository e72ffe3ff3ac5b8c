use geojson::JsonObject;

use crate::crs::descriptor::CrsDescriptor;

/// Field name under which geometry travels in the interchange form. It is
/// not an attribute and must never reach a tooltip, even when a service
/// leaks it into the properties.
pub const GEOMETRY_FIELD: &str = "geometry";

/// One record of the remote dataset: a geometry (None when the service
/// delivered a null one) and its attributes in document order.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Option<geo::Geometry>,
    pub attributes: JsonObject,
}

/// Feature records plus the collection-level metadata the renderers need:
/// the declared CRS and the attribute schema.
#[derive(Debug, Clone)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub crs: Option<CrsDescriptor>,
    schema: Vec<String>,
}

impl FeatureCollection {
    /// The schema comes from the first feature; the services this tool
    /// targets emit a uniform schema across a collection.
    pub fn new(features: Vec<Feature>, crs: Option<CrsDescriptor>) -> Self {
        let schema = features
            .first()
            .map(|feature| feature.attributes.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            features,
            crs,
            schema,
        }
    }

    /// Same features under a different CRS tag. For the normalization
    /// paths that change no coordinates.
    pub fn with_crs(self, crs: CrsDescriptor) -> Self {
        Self {
            crs: Some(crs),
            ..self
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Attribute field names in document order.
    pub fn field_names(&self) -> &[String] {
        &self.schema
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.schema.iter().any(|field| field == name)
    }

    /// All non-null geometries.
    pub fn geometries(&self) -> impl Iterator<Item = &geo::Geometry> {
        self.features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
    }

    pub fn null_geometry_count(&self) -> usize {
        self.features
            .iter()
            .filter(|feature| feature.geometry.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use geojson::{JsonObject, JsonValue};

    use super::{Feature, FeatureCollection};

    fn attrs(pairs: Vec<(&str, JsonValue)>) -> JsonObject {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect()
    }

    #[test]
    fn test_schema_follows_the_first_feature_in_document_order() {
        let collection = FeatureCollection::new(
            vec![Feature {
                geometry: None,
                attributes: attrs(vec![
                    ("NOMEL_1", "Planalto".into()),
                    ("AREA_KM2", 12.5.into()),
                ]),
            }],
            None,
        );
        let fields: Vec<&str> = collection.field_names().iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["NOMEL_1", "AREA_KM2"]);
        assert!(collection.has_field("NOMEL_1"));
        assert!(!collection.has_field("nomel_1"));
    }

    #[test]
    fn test_empty_collection_has_an_empty_schema() {
        let collection = FeatureCollection::new(Vec::new(), None);
        assert!(collection.is_empty());
        assert!(collection.field_names().is_empty());
    }

    #[test]
    fn test_geometry_helpers_account_for_nulls() {
        let collection = FeatureCollection::new(
            vec![
                Feature {
                    geometry: Some(geo::Geometry::Point(geo::Point::new(1.0, 2.0))),
                    attributes: JsonObject::new(),
                },
                Feature {
                    geometry: None,
                    attributes: JsonObject::new(),
                },
            ],
            None,
        );
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.geometries().count(), 1);
        assert_eq!(collection.null_geometry_count(), 1);
    }
}
