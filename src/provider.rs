//! The geolocation provider abstraction shared by all backends.

use std::future::Future;

use thiserror::Error;

use crate::model::{Location, Observation};

/// Message used when the service rejects a request without explaining why.
/// The service itself answers in Chinese; this placeholder is English.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Network, TLS or HTTP level failure
    #[error("transport error: {0}")]
    Transport(String),
    /// Body or one of its numeric fields could not be parsed
    #[error("invalid response: {0}")]
    Parse(String),
    /// The service answered but could not locate the observation
    #[error("{info}")]
    Rejected { info: String, code: Option<String> },
}

impl ProviderError {
    pub fn rejected(info: Option<String>, code: Option<String>) -> Self {
        ProviderError::Rejected {
            info: info.unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
            code,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(value: serde_json::Error) -> Self {
        ProviderError::Parse(value.to_string())
    }
}

/// Receives the outcome of [`GeolocationProvider::get_location`].
pub trait LocationCallback {
    fn on_success(&mut self, latitude: f64, longitude: f64, radius: u32);

    fn on_failure(&mut self, error: ProviderError);
}

pub trait GeolocationProvider: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Estimates a position for the observation.
    fn locate(
        &self,
        observation: &Observation,
    ) -> impl Future<Output = Result<Location, ProviderError>> + Send;

    /// Runs [`locate`](Self::locate) and reports the outcome to exactly one
    /// of the callback's methods, exactly once.
    fn get_location<C>(
        &self,
        observation: &Observation,
        mut callback: C,
    ) -> impl Future<Output = ()> + Send
    where
        C: LocationCallback + Send,
    {
        async move {
            match self.locate(observation).await {
                Ok(Location {
                    latitude,
                    longitude,
                    radius,
                }) => callback.on_success(latitude, longitude, radius),
                Err(e) => callback.on_failure(e),
            }
        }
    }
}
