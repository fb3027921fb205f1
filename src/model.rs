use serde::{Deserialize, Serialize};

/// Locally scanned wireless signals used as positioning input.
///
/// Both collections keep scan order. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub wifi_access_points: Vec<WifiAccessPoint>,
    #[serde(default)]
    pub cell_towers: Vec<CellTower>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiAccessPoint {
    pub mac_address: String,
    #[serde(default)]
    pub signal_strength: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellTower {
    // free-form label as reported by the device, e.g. "gsm", "CDMA", "lte"
    #[serde(default)]
    pub radio_type: Option<String>,
    pub mobile_country_code: u16,
    pub mobile_network_code: u16,
    pub location_area_code: u32,
    pub cell_id: u64,
    #[serde(default)]
    pub signal_strength: Option<i32>,
}

impl WifiAccessPoint {
    pub fn new(mac_address: impl Into<String>, signal_strength: i32) -> Self {
        Self {
            mac_address: mac_address.into(),
            signal_strength,
        }
    }
}

/// A resolved position. Radius is the accuracy in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, radius: u32) -> Self {
        Self {
            latitude,
            longitude,
            radius,
        }
    }
}
