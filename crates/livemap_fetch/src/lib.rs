//! HTTP client for the stations API.
//!
//! This library fetches the station GeoJSON for a viewport from the
//! backend and hands it to the reconcile layer untouched.

use std::time::Duration;

use livemap_core::{FeatureCollection, LatLngBounds};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Stations request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Stations endpoint answered with status {status}")]
    Status { status: u16 },
    #[error("Cannot query stations for empty bounds")]
    EmptyBounds,
}

/// The viewport a fetch asks the backend about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationQuery {
    pub bounds: LatLngBounds,
    pub zoom: u8,
}

/// A source of station data for a viewport.
///
/// The viewer session is generic over this, so tests feed it canned
/// collections instead of a network.
#[allow(async_fn_in_trait)]
pub trait StationFetcher {
    async fn fetch_stations(&self, query: &StationQuery) -> Result<FeatureCollection, FetchError>;
}

/// Fetches stations from the backend over HTTP.
pub struct HttpStationFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStationFetcher {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(HttpStationFetcher::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        HttpStationFetcher {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn stations_url(&self, query: &StationQuery) -> Result<String, FetchError> {
        let Some(bbox) = query.bounds.to_bbox_string() else {
            return Err(FetchError::EmptyBounds);
        };
        Ok(format!(
            "{}/api/stations?bounds={}&zoom={}",
            self.base_url, bbox, query.zoom
        ))
    }
}

impl StationFetcher for HttpStationFetcher {
    async fn fetch_stations(&self, query: &StationQuery) -> Result<FeatureCollection, FetchError> {
        let url = self.stations_url(query)?;
        tracing::debug!("Fetching stations from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::get,
    };
    use livemap_core::LatLng;

    type SeenParams = Arc<Mutex<Option<HashMap<String, String>>>>;

    fn stations_body() -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"id": "ST-001", "num_stations": 2, "plug1_power": 150.0},
                    "geometry": {"type": "Point", "coordinates": [-98.35, 39.5]}
                }
            ]
        })
    }

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind the stub server");
        let addr = listener
            .local_addr()
            .expect("Could not read the stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub server failed");
        });
        format!("http://{addr}")
    }

    fn wide_query() -> StationQuery {
        StationQuery {
            bounds: LatLngBounds::new(LatLng::new(39.0, -99.0), LatLng::new(40.0, -98.0)),
            zoom: 4,
        }
    }

    #[tokio::test]
    async fn test_fetch_decodes_stations() {
        let app = Router::new().route("/api/stations", get(|| async { Json(stations_body()) }));
        let base = spawn_stub(app).await;

        let fetcher = HttpStationFetcher::new(&base).expect("Could not build the fetcher");
        let collection = fetcher
            .fetch_stations(&wide_query())
            .await
            .expect("Could not fetch stations");

        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].id(), Some("ST-001"));
    }

    #[tokio::test]
    async fn test_fetch_sends_bounds_and_zoom() {
        let seen: SeenParams = Arc::new(Mutex::new(None));
        let app = Router::new()
            .route(
                "/api/stations",
                get(
                    |State(seen): State<SeenParams>,
                     Query(params): Query<HashMap<String, String>>| async move {
                        *seen.lock().expect("Stub lock poisoned") = Some(params);
                        Json(stations_body())
                    },
                ),
            )
            .with_state(seen.clone());
        let base = spawn_stub(app).await;

        let fetcher = HttpStationFetcher::new(&base).expect("Could not build the fetcher");
        fetcher
            .fetch_stations(&wide_query())
            .await
            .expect("Could not fetch stations");

        let params = seen
            .lock()
            .expect("Stub lock poisoned")
            .clone()
            .expect("Stub saw no request");
        assert_eq!(
            params.get("bounds").map(String::as_str),
            Some("-99,39,-98,40")
        );
        assert_eq!(params.get("zoom").map(String::as_str), Some("4"));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let app = Router::new().route(
            "/api/stations",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_stub(app).await;

        let fetcher = HttpStationFetcher::new(&base).expect("Could not build the fetcher");
        let result = fetcher.fetch_stations(&wide_query()).await;
        match result {
            Err(FetchError::Status { status }) => assert_eq!(status, 500),
            other => panic!("Expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_maps_to_transport() {
        let app = Router::new().route("/api/stations", get(|| async { "not json" }));
        let base = spawn_stub(app).await;

        let fetcher = HttpStationFetcher::new(&base).expect("Could not build the fetcher");
        let result = fetcher.fetch_stations(&wide_query()).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_empty_bounds_are_rejected_before_any_request() {
        let fetcher =
            HttpStationFetcher::new("http://localhost:1").expect("Could not build the fetcher");
        let query = StationQuery {
            bounds: LatLngBounds::default(),
            zoom: 4,
        };
        let result = fetcher.fetch_stations(&query).await;
        assert!(matches!(result, Err(FetchError::EmptyBounds)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let fetcher =
            HttpStationFetcher::new("http://localhost:5000/").expect("Could not build the fetcher");
        let url = fetcher
            .stations_url(&wide_query())
            .expect("Could not build the url");
        assert_eq!(
            url,
            "http://localhost:5000/api/stations?bounds=-99,39,-98,40&zoom=4"
        );
    }
}
