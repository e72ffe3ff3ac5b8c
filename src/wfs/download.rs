use geojson::GeoJson;
use serde::Deserialize;
use thiserror::Error;

use crate::geofile::feature::FeatureCollection;
use crate::geofile::geojson::collection_from_geojson;

const USER_AGENT: &str = "geomorph-mapper";

/// Certificate handling for the outgoing request. The insecure variant
/// exists for services behind interception proxies; it is scoped to the
/// client built here, never a process-wide default.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustPolicy {
    Verify,
    InsecureSkipVerify,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        TrustPolicy::Verify
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("the response from {url} is not a usable GeoJSON feature collection: {source}")]
    Payload {
        url: String,
        #[source]
        source: geojson::Error,
    },
}

/// One GET against the service, no retry. Any transport problem, non-2xx
/// answer or unusable payload is a [`FetchError`].
pub fn fetch_feature_collection(
    url: &str,
    trust: TrustPolicy,
) -> Result<FeatureCollection, FetchError> {
    if trust == TrustPolicy::InsecureSkipVerify {
        log::warn!("Certificate verification is disabled for this request");
    }
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(trust == TrustPolicy::InsecureSkipVerify)
        .build()
        .map_err(|source| transport(url, source))?;
    let response = client.get(url).send().map_err(|source| transport(url, source))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status,
        });
    }
    let body = response.text().map_err(|source| transport(url, source))?;
    let raw: GeoJson = body.parse().map_err(|source| payload(url, source))?;
    collection_from_geojson(raw).map_err(|source| payload(url, source))
}

fn transport(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_owned(),
        source,
    }
}

fn payload(url: &str, source: geojson::Error) -> FetchError {
    FetchError::Payload {
        url: url.to_owned(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{fetch_feature_collection, FetchError, TrustPolicy};

    #[test]
    fn test_connection_refused_surfaces_as_a_transport_error() {
        // Port 9 (discard) is reliably closed on loopback.
        let result = fetch_feature_collection("http://127.0.0.1:9/ows", TrustPolicy::Verify);
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[test]
    fn test_trust_defaults_to_verification() {
        assert_eq!(TrustPolicy::default(), TrustPolicy::Verify);
    }
}
