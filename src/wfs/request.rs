use serde::Deserialize;

/// Protocol version the GetFeature query pins. GeoServer answers a 1.0.0
/// JSON request with a GeoJSON feature collection.
pub const WFS_VERSION: &str = "1.0.0";

/// Remote service to query: its base URL and the layer to request.
#[derive(Deserialize, Debug, Clone)]
pub struct WfsEndpoint {
    pub base_url: String,
    pub type_name: String,
}

/// The fixed GetFeature query for the endpoint, JSON output.
pub fn get_feature_url(endpoint: &WfsEndpoint) -> String {
    format!(
        "{}?service=WFS&version={}&request=GetFeature&typeName={}&outputFormat=JSON",
        endpoint.base_url, WFS_VERSION, endpoint.type_name
    )
}

#[cfg(test)]
mod tests {
    use super::{get_feature_url, WfsEndpoint};

    #[test]
    fn test_get_feature_url_carries_the_fixed_query() {
        let url = get_feature_url(&WfsEndpoint {
            base_url: "https://geoservicos.ibge.gov.br/geoserver/ows".to_owned(),
            type_name: "CREN:geomorfologia_250mil".to_owned(),
        });
        assert_eq!(
            url,
            "https://geoservicos.ibge.gov.br/geoserver/ows?service=WFS&version=1.0.0\
             &request=GetFeature&typeName=CREN:geomorfologia_250mil&outputFormat=JSON"
        );
    }
}
