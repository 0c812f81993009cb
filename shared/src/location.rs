use geojson::{Feature, FeatureCollection, JsonValue, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("feature {index} has no geometry")]
    MissingGeometry { index: usize },
    #[error("feature {index} is not a point")]
    NotAPoint { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarcanKind {
    Oppp,
    Distribution,
}

impl NarcanKind {
    pub fn from_property(location_type: Option<&str>) -> Self {
        match location_type {
            Some("OPPP") => Self::Oppp,
            _ => Self::Distribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityKind {
    AdultCare,
    NursingHome,
    Hospital,
    /// Any other `location_type`, kept verbatim (empty when the property is missing).
    Other(String),
}

impl FacilityKind {
    pub fn from_property(location_type: Option<&str>) -> Self {
        match location_type {
            Some("Adult Care Facility") => Self::AdultCare,
            Some("Nursing Home") => Self::NursingHome,
            Some("Hospital") => Self::Hospital,
            other => Self::Other(other.unwrap_or_default().to_owned()),
        }
    }

    /// Text shown under the facility name.
    pub fn label(&self) -> &str {
        match self {
            Self::AdultCare => "Adult Care Facility",
            Self::NursingHome => "Nursing Home",
            Self::Hospital => "Hospital",
            Self::Other(raw) if raw.is_empty() => "Location",
            Self::Other(raw) => raw,
        }
    }
}

/// A point from the Narcan/OPPP dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct NarcanSite {
    pub name: String,
    pub address: String,
    pub hours: String,
    pub narcan_location: String,
    pub kind: NarcanKind,
    pub position: LngLat,
}

/// A point from the care-facility dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub name: String,
    pub address: String,
    pub hours: Option<String>,
    pub kind: FacilityKind,
    pub position: LngLat,
}

impl NarcanSite {
    fn from_feature(feature: &Feature, position: LngLat) -> Self {
        Self {
            name: text(feature, "name").unwrap_or_default(),
            address: text(feature, "address").unwrap_or_default(),
            hours: text(feature, "hours").unwrap_or_default(),
            narcan_location: text(feature, "narcanlocation").unwrap_or_default(),
            kind: NarcanKind::from_property(text(feature, "location_type").as_deref()),
            position,
        }
    }
}

impl Facility {
    fn from_feature(feature: &Feature, position: LngLat) -> Self {
        Self {
            name: text(feature, "name").unwrap_or_default(),
            address: text(feature, "address").unwrap_or_default(),
            // the spreadsheet export writes empty cells as ""
            hours: text(feature, "hours").filter(|h| !h.is_empty()),
            kind: FacilityKind::from_property(text(feature, "location_type").as_deref()),
            position,
        }
    }
}

pub fn narcan_sites(collection: &FeatureCollection) -> Result<Vec<NarcanSite>, LocationError> {
    parse_all(collection, NarcanSite::from_feature)
}

pub fn facilities(collection: &FeatureCollection) -> Result<Vec<Facility>, LocationError> {
    parse_all(collection, Facility::from_feature)
}

// all or nothing: one bad geometry rejects the whole collection
fn parse_all<T>(
    collection: &FeatureCollection,
    make: impl Fn(&Feature, LngLat) -> T,
) -> Result<Vec<T>, LocationError> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| Ok(make(feature, position(index, feature)?)))
        .collect()
}

fn position(index: usize, feature: &Feature) -> Result<LngLat, LocationError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(LocationError::MissingGeometry { index })?;
    match &geometry.value {
        Value::Point(coords) if coords.len() >= 2 => Ok(LngLat::new(coords[0], coords[1])),
        _ => Err(LocationError::NotAPoint { index }),
    }
}

fn text(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: &str) -> FeatureCollection {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn facilities_keep_fetch_order() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-74.1,41.2]},
                 "properties":{"name":"B","location_type":"Hospital","hours":""}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-74.3,41.4]},
                 "properties":{"name":"A","location_type":"facility","hours":"9-5"}}
            ]}"#,
        );
        let parsed = facilities(&fc).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "B");
        assert_eq!(parsed[0].kind, FacilityKind::Hospital);
        assert_eq!(parsed[0].hours, None);
        assert_eq!(parsed[1].kind, FacilityKind::Other("facility".into()));
        assert_eq!(parsed[1].hours.as_deref(), Some("9-5"));
        assert_eq!(parsed[1].position, LngLat::new(-74.3, 41.4));
    }

    #[test]
    fn narcan_kind_is_binary() {
        assert_eq!(NarcanKind::from_property(Some("OPPP")), NarcanKind::Oppp);
        assert_eq!(NarcanKind::from_property(Some("oppp")), NarcanKind::Distribution);
        assert_eq!(NarcanKind::from_property(None), NarcanKind::Distribution);
    }

    #[test]
    fn missing_and_odd_properties() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-74.0,41.0]},
                 "properties":{"name":42,"address":null}}
            ]}"#,
        );
        let site = &narcan_sites(&fc).unwrap()[0];
        assert_eq!(site.name, "42");
        assert_eq!(site.address, "");
        assert_eq!(site.narcan_location, "");
        assert_eq!(site.kind, NarcanKind::Distribution);
    }

    #[test]
    fn non_point_rejects_collection() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-74.0,41.0]},"properties":{}},
                {"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]},"properties":{}},
                {"type":"Feature","geometry":null,"properties":{}}
            ]}"#,
        );
        assert_eq!(facilities(&fc), Err(LocationError::NotAPoint { index: 1 }));
    }

    #[test]
    fn unknown_facility_label() {
        assert_eq!(FacilityKind::from_property(None).label(), "Location");
        assert_eq!(FacilityKind::from_property(Some("Clinic")).label(), "Clinic");
    }
}
