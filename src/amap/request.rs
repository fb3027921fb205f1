//! Serde representation of an AMap IoT positioning request.

use serde::Serialize;

use crate::model::{CellTower, Observation, WifiAccessPoint};

/// Most networks the service accepts besides the main one
pub const MAX_ADDITIONAL_MACS: usize = 29;

/// `accesstype` value for cell based positioning
pub const ACCESS_TYPE_CELL: u8 = 1;
/// `accesstype` value for wifi based positioning
pub const ACCESS_TYPE_WIFI: u8 = 2;

const NETWORK_GSM: &str = "GSM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accesstype: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mmac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdma: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bts: Option<String>,
}

impl RequestPayload {
    pub fn build(key: &str, observation: &Observation) -> Self {
        let mut payload = Self {
            key: key.to_owned(),
            accesstype: None,
            mmac: None,
            macs: None,
            network: None,
            cdma: None,
            bts: None,
        };

        if let Some((main, rest)) = observation.wifi_access_points.split_first() {
            payload.accesstype = Some(ACCESS_TYPE_WIFI);
            payload.mmac = Some(format_mac_entry(main));
            if !rest.is_empty() {
                payload.macs = Some(join_additional_macs(rest));
            }
        }

        // cell wins over wifi when both are present; only the first tower is sent
        if let Some(main) = observation.cell_towers.first() {
            payload.accesstype = Some(ACCESS_TYPE_CELL);
            payload.network = Some(NETWORK_GSM);
            payload.cdma = Some(if is_cdma(main) { "1" } else { "0" });
            payload.bts = Some(format_bts(main));
        }

        payload
    }
}

/// `<mac>,<signal>,,-1`, the ssid slot is left empty.
pub fn format_mac_entry(ap: &WifiAccessPoint) -> String {
    format!("{},{},,-1", ap.mac_address, ap.signal_strength)
}

/// Entries beyond [`MAX_ADDITIONAL_MACS`] are dropped.
pub fn join_additional_macs(aps: &[WifiAccessPoint]) -> String {
    aps.iter()
        .take(MAX_ADDITIONAL_MACS)
        .map(format_mac_entry)
        .collect::<Vec<_>>()
        .join("|")
}

/// `<mcc>,<mnc>,<lac>,<cellid>,<signal>,0`
pub fn format_bts(cell: &CellTower) -> String {
    format!(
        "{},{},{},{},{},0",
        cell.mobile_country_code,
        cell.mobile_network_code,
        cell.location_area_code,
        cell.cell_id,
        cell.signal_strength.unwrap_or(0),
    )
}

pub fn is_cdma(cell: &CellTower) -> bool {
    cell.radio_type
        .as_deref()
        .is_some_and(|x| x.eq_ignore_ascii_case("cdma"))
}
