//! Serde representation of an AMap IoT positioning response.

use serde::{Deserialize, Deserializer};

use crate::{model::Location, provider::ProviderError};

/// Value of `status` on success
pub const STATUS_OK: &str = "1";

#[derive(Debug, Deserialize)]
struct AmapResponse {
    status: Scalar,
    #[serde(default)]
    position: Option<String>,
    // an explicit null is kept apart from an absent field
    #[serde(default, deserialize_with = "present")]
    radius: Option<Option<Scalar>>,
    #[serde(default)]
    info: Option<String>,
    #[serde(default)]
    infocode: Option<Scalar>,
}

/// The service is loose about sending numbers as strings and vice versa.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Scalar {
    fn is(&self, expected: &str) -> bool {
        match self {
            Scalar::Text(x) => x == expected,
            Scalar::Number(x) => x.to_string() == expected,
        }
    }

    fn into_string(self) -> String {
        match self {
            Scalar::Text(x) => x,
            Scalar::Number(x) => x.to_string(),
        }
    }
}

/// Interprets a raw response body.
pub fn decode(body: &[u8]) -> Result<Location, ProviderError> {
    let response: AmapResponse = serde_json::from_slice(body)?;

    match response.position {
        Some(position) if response.status.is(STATUS_OK) => {
            let (longitude, latitude) = parse_position(&position)?;
            let radius = match &response.radius {
                Some(Some(x)) => parse_radius(x)?,
                Some(None) => return Err(ProviderError::Parse("radius is null".into())),
                None => 0,
            };
            Ok(Location::new(latitude, longitude, radius))
        }
        _ => Err(ProviderError::rejected(
            response.info,
            response.infocode.map(Scalar::into_string),
        )),
    }
}

/// Splits `"<longitude>,<latitude>"`, note longitude comes first.
pub fn parse_position(position: &str) -> Result<(f64, f64), ProviderError> {
    let parts: Vec<_> = position.split(',').map(str::trim).collect();
    let &[lon, lat] = parts.as_slice() else {
        return Err(ProviderError::Parse(format!(
            "expected \"lon,lat\" position, got {position:?}"
        )));
    };

    let parse = |x: &str| match x.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(ProviderError::Parse(format!("bad coordinate {x:?}"))),
        Err(e) => Err(ProviderError::Parse(format!("bad coordinate {x:?}: {e}"))),
    };
    Ok((parse(lon)?, parse(lat)?))
}

fn parse_radius(radius: &Scalar) -> Result<u32, ProviderError> {
    let value = match radius {
        Scalar::Number(x) => x.as_f64(),
        Scalar::Text(x) => x.trim().parse::<f64>().ok(),
    };

    match value {
        Some(x) if x.is_finite() && x >= 0.0 && x <= u32::MAX as f64 => Ok(x as u32),
        _ => Err(ProviderError::Parse(format!("bad radius {radius:?}"))),
    }
}
