use std::fmt;

use geojson::JsonObject;

pub type EpsgCode = u32;

/// EPSG code of the geographic WGS84 system web maps expect.
pub const WGS84_EPSG: EpsgCode = 4326;

pub fn epsg_code_to_authority_string(code: EpsgCode) -> String {
    format!("EPSG:{}", code)
}

/// Coordinate reference system as declared by a feature payload: the
/// authority string as found, plus the EPSG code parsed out of it when one
/// is recognizable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrsDescriptor {
    name: String,
    epsg: Option<EpsgCode>,
}

impl CrsDescriptor {
    pub fn wgs84() -> Self {
        Self {
            name: epsg_code_to_authority_string(WGS84_EPSG),
            epsg: Some(WGS84_EPSG),
        }
    }

    /// Parse an authority string.
    ///
    /// Recognized spellings: "EPSG:4674", "urn:ogc:def:crs:EPSG::4674",
    /// the OGC "CRS84" aliases of WGS84, and bare numeric codes. Anything
    /// else keeps the name but carries no code.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        Self {
            name: trimmed.to_owned(),
            epsg: parse_epsg_code(trimmed),
        }
    }

    /// Pull the legacy `crs` member out of a feature collection's foreign
    /// members. WFS 1.0.0 JSON outputs still emit it as
    /// `"crs": {"type": "name", "properties": {"name": "..."}}`.
    pub fn from_foreign_members(members: Option<&JsonObject>) -> Option<Self> {
        let name = members?
            .get("crs")?
            .get("properties")?
            .get("name")?
            .as_str()?;
        Some(Self::parse(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epsg(&self) -> Option<EpsgCode> {
        self.epsg
    }

    pub fn is_wgs84(&self) -> bool {
        self.epsg == Some(WGS84_EPSG)
    }
}

impl fmt::Display for CrsDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn parse_epsg_code(name: &str) -> Option<EpsgCode> {
    // OGC's CRS84 is WGS84 with lon/lat axis order, which is the order
    // GeoJSON coordinates use anyway.
    if name.ends_with("CRS84") {
        return Some(WGS84_EPSG);
    }
    if let Ok(code) = name.parse::<EpsgCode>() {
        return Some(code);
    }
    if !name.to_ascii_uppercase().contains("EPSG") {
        return None;
    }
    name.rsplit(':')
        .find(|part| !part.is_empty())?
        .parse()
        .ok()
}
