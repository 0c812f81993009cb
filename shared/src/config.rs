use serde::{Deserialize, Serialize};

use crate::location::LngLat;

pub const CONFIG_PATH: &str = "config.json";
pub const BOUNDARY_PATH: &str = "Orange_County_Border.geojson";
pub const LOCATIONS_PATH: &str = "Orange_County_Locations.geojson";
pub const NARCAN_PATH: &str = "Narcan_Locations.geojson";

/// Map settings served to the client as `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub access_token: String,
    pub style: String,
    pub center: LngLat,
    pub zoom: f64,
    pub boundary: String,
    pub locations: String,
    /// The Narcan/OPPP dataset is only loaded when a path is set.
    pub narcan: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style: "mapbox://styles/mapbox/streets-v11".to_owned(),
            center: LngLat::new(-74.3118, 41.3919),
            zoom: 10.0,
            boundary: BOUNDARY_PATH.to_owned(),
            locations: LOCATIONS_PATH.to_owned(),
            narcan: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: MapConfig =
            serde_json::from_str(r#"{"access_token":"pk.test","narcan":"narcan.geojson"}"#)
                .unwrap();
        assert_eq!(config.access_token, "pk.test");
        assert_eq!(config.narcan.as_deref(), Some("narcan.geojson"));
        assert_eq!(config.zoom, 10.0);
        assert_eq!(config.locations, LOCATIONS_PATH);
    }
}
