//! Wifi and cell based geolocation through the AMap IoT positioning API.

pub mod amap;
pub mod config;
pub mod geolocate;
pub mod model;
pub mod provider;
pub mod transport;

pub use amap::AmapProvider;
pub use model::{CellTower, Location, Observation, WifiAccessPoint};
pub use provider::{GeolocationProvider, LocationCallback, ProviderError};
