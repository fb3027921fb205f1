use actix_web::{error::ErrorBadGateway, web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::{
    model::{Location, Observation},
    provider::{GeolocationProvider, ProviderError},
};

#[derive(Debug, Serialize)]
struct LocationResponse {
    location: LatLng,
    accuracy: f64,
}

#[derive(Debug, Serialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<Location> for LocationResponse {
    fn from(value: Location) -> Self {
        LocationResponse {
            location: LatLng {
                lat: value.latitude,
                lng: value.longitude,
            },
            accuracy: value.radius as f64,
        }
    }
}

/// Mounts `POST /v1/geolocate` backed by the provider stored in app data.
pub fn configure<P: GeolocationProvider + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/geolocate", web::post().to(service::<P>));
}

async fn service<P: GeolocationProvider + 'static>(
    data: web::Json<Observation>,
    provider: web::Data<P>,
) -> actix_web::Result<HttpResponse> {
    let observation = data.into_inner();
    debug!(
        wifi = observation.wifi_access_points.len(),
        cells = observation.cell_towers.len(),
        provider = provider.name(),
        "geolocate request"
    );

    match provider.locate(&observation).await {
        Ok(location) => Ok(HttpResponse::Ok().json(LocationResponse::from(location))),
        Err(ProviderError::Rejected { .. }) => Ok(HttpResponse::NotFound().json(json!(
            {
                "error": {
                    "errors": [{
                        "domain": "geolocation",
                        "reason": "notFound",
                        "message": "No location could be estimated based on the data provided",
                    }],
                    "code": 404,
                    "message": "Not found",
                }
            }
        ))),
        Err(e) => Err(ErrorBadGateway(e)),
    }
}
