use std::sync::{Arc, Mutex};

use amapgeo::{
    amap::request::{RequestPayload, ACCESS_TYPE_CELL},
    provider::UNKNOWN_ERROR,
    transport::Transport,
    AmapProvider, CellTower, GeolocationProvider, Location, LocationCallback, Observation,
    ProviderError, WifiAccessPoint,
};

/// Answers every request with a canned body and remembers what was sent.
struct CannedTransport {
    body: String,
    sent: Mutex<Vec<RequestPayload>>,
}

impl CannedTransport {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_owned(),
            sent: Mutex::default(),
        }
    }
}

impl Transport for CannedTransport {
    async fn send(&self, payload: &RequestPayload) -> Result<Vec<u8>, ProviderError> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(self.body.clone().into_bytes())
    }
}

/// Reports the cell id of the first tower back as a coordinate.
struct CellEchoTransport;

impl Transport for CellEchoTransport {
    async fn send(&self, payload: &RequestPayload) -> Result<Vec<u8>, ProviderError> {
        let bts = payload.bts.as_deref().unwrap_or_default();
        let cell: f64 = bts.split(',').nth(3).unwrap().parse().unwrap();
        let latitude = cell / 1000.0;
        let longitude = -cell / 100.0;
        Ok(format!(r#"{{"status":"1","position":"{longitude},{latitude}","radius":"{cell}"}}"#)
            .into_bytes())
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    async fn send(&self, _: &RequestPayload) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::Transport("connection refused".into()))
    }
}

#[derive(Default)]
struct RecordingCallback {
    outcomes: Vec<Result<Location, ProviderError>>,
}

impl LocationCallback for &mut RecordingCallback {
    fn on_success(&mut self, latitude: f64, longitude: f64, radius: u32) {
        self.outcomes
            .push(Ok(Location::new(latitude, longitude, radius)));
    }

    fn on_failure(&mut self, error: ProviderError) {
        self.outcomes.push(Err(error));
    }
}

fn cell(cell_id: u64) -> CellTower {
    CellTower {
        radio_type: Some("lte".into()),
        mobile_country_code: 460,
        mobile_network_code: 0,
        location_area_code: 4566,
        cell_id,
        signal_strength: Some(-80),
    }
}

fn mixed_observation() -> Observation {
    Observation {
        wifi_access_points: vec![
            WifiAccessPoint::new("f0:7d:68:9e:7d:18", -41),
            WifiAccessPoint::new("f4:6a:92:0c:2d:5e", -68),
        ],
        cell_towers: vec![cell(1234)],
    }
}

#[tokio::test]
async fn echo_keeps_coordinate_order() {
    let provider = AmapProvider::new("key", CellEchoTransport);
    let location = provider
        .locate(&Observation {
            wifi_access_points: vec![],
            cell_towers: vec![cell(31230)],
        })
        .await
        .unwrap();

    assert_eq!(location, Location::new(31.23, -312.3, 31230));
}

#[tokio::test]
async fn sends_key_and_encoded_observation() {
    let transport = CannedTransport::new(r#"{"status":"1","position":"121.47,31.23","radius":50}"#);
    let provider = AmapProvider::new("my-key", transport);

    let location = provider.locate(&mixed_observation()).await.unwrap();
    assert_eq!(location, Location::new(31.23, 121.47, 50));

    let sent = provider.transport().sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].key, "my-key");
    assert_eq!(sent[0].accesstype, Some(ACCESS_TYPE_CELL));
    assert_eq!(sent[0].mmac.as_deref(), Some("f0:7d:68:9e:7d:18,-41,,-1"));
    assert_eq!(sent[0].macs.as_deref(), Some("f4:6a:92:0c:2d:5e,-68,,-1"));
    assert_eq!(sent[0].bts.as_deref(), Some("460,0,4566,1234,-80,0"));
}

#[tokio::test]
async fn empty_observation_is_sent() {
    let provider = AmapProvider::new("k", CannedTransport::new(r#"{"status":"0","info":"INVALID_PARAMS"}"#));

    let err = provider.locate(&Observation::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "INVALID_PARAMS");

    let sent = provider.transport().sent.lock().unwrap();
    assert_eq!(serde_json::to_string(&sent[0]).unwrap(), r#"{"key":"k"}"#);
}

#[tokio::test]
async fn callback_success() {
    let provider = AmapProvider::new(
        "k",
        CannedTransport::new(r#"{"status":"1","position":"121.47,31.23"}"#),
    );
    let mut callback = RecordingCallback::default();
    provider
        .get_location(&mixed_observation(), &mut callback)
        .await;

    assert_eq!(callback.outcomes, vec![Ok(Location::new(31.23, 121.47, 0))]);
}

#[tokio::test]
async fn callback_rejected() {
    let provider = AmapProvider::new("k", CannedTransport::new(r#"{"status":"0"}"#));
    let mut callback = RecordingCallback::default();
    provider
        .get_location(&mixed_observation(), &mut callback)
        .await;

    assert_eq!(
        callback.outcomes,
        vec![Err(ProviderError::Rejected {
            info: UNKNOWN_ERROR.into(),
            code: None
        })]
    );
}

#[tokio::test]
async fn callback_parse_failure() {
    let provider = AmapProvider::new("k", CannedTransport::new("<html>"));
    let mut callback = RecordingCallback::default();
    provider
        .get_location(&mixed_observation(), &mut callback)
        .await;

    assert_eq!(callback.outcomes.len(), 1);
    assert!(matches!(callback.outcomes[0], Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn callback_transport_failure() {
    let provider = AmapProvider::new("k", FailingTransport);
    let mut callback = RecordingCallback::default();
    provider
        .get_location(&mixed_observation(), &mut callback)
        .await;

    assert_eq!(
        callback.outcomes,
        vec![Err(ProviderError::Transport("connection refused".into()))]
    );
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let provider = Arc::new(AmapProvider::new("k", CellEchoTransport));

    let handles: Vec<_> = (1..=32u64)
        .map(|i| {
            let provider = provider.clone();
            tokio::spawn(async move {
                let observation = Observation {
                    wifi_access_points: vec![],
                    cell_towers: vec![cell(i * 1000)],
                };
                (i, provider.locate(&observation).await)
            })
        })
        .collect();

    for handle in handles {
        let (i, result) = handle.await.unwrap();
        let location = result.unwrap();
        assert_eq!(location.latitude, i as f64);
        assert_eq!(location.radius, (i * 1000) as u32);
    }
}
