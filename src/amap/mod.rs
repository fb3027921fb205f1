//! Geolocation through the AMap (Gaode) IoT positioning API.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    config::AmapConfig,
    model::{Location, Observation},
    provider::{GeolocationProvider, ProviderError},
    transport::{HttpTransport, Transport},
};

pub mod request;
pub mod response;

use request::RequestPayload;

pub const AMAP_API_URL: &str = "https://restapi.amap.com/v5/position/IoT";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AmapProvider<T> {
    key: String,
    transport: T,
}

impl<T> AmapProvider<T> {
    pub fn new(key: impl Into<String>, transport: T) -> Self {
        Self {
            key: key.into(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl AmapProvider<HttpTransport> {
    pub fn from_config(config: &AmapConfig) -> Result<Self, ProviderError> {
        let url = config.url.as_deref().unwrap_or(AMAP_API_URL);
        let timeout = config
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let transport = HttpTransport::new(url, timeout)?;
        Ok(Self::new(config.key.clone(), transport))
    }
}

impl<T: Transport> GeolocationProvider for AmapProvider<T> {
    fn name(&self) -> &str {
        "amap"
    }

    async fn locate(&self, observation: &Observation) -> Result<Location, ProviderError> {
        let payload = RequestPayload::build(&self.key, observation);
        debug!(
            accesstype = ?payload.accesstype,
            mmac = ?payload.mmac,
            macs = ?payload.macs,
            bts = ?payload.bts,
            "sending amap request"
        );

        let body = self.transport.send(&payload).await?;
        debug!(body = %String::from_utf8_lossy(&body), "amap response");

        let result = response::decode(&body);
        if let Err(e) = &result {
            warn!("amap could not locate observation: {e}");
        }
        result
    }
}

// the key must never be printed
impl<T> std::fmt::Debug for AmapProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmapProvider").finish_non_exhaustive()
    }
}
