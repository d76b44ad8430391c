use formats::{AircraftState, decode_states};
use foundation::GeoBounds;
use tracing::{debug, info};

use crate::client::FeedClient;
use crate::error::{FeedError, FeedKind};

pub const DEFAULT_AIRCRAFT_URL: &str = "https://opensky-network.org/api/states/all";

/// Fetches current aircraft state vectors inside a bounding box.
pub struct AircraftFeedAdapter<C> {
    client: C,
    url: String,
}

impl<C: FeedClient> AircraftFeedAdapter<C> {
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn fetch_aircraft(&self, bbox: GeoBounds) -> Result<Vec<AircraftState>, FeedError> {
        let query = [
            ("lamin", bbox.lat_min.to_string()),
            ("lamax", bbox.lat_max.to_string()),
            ("lomin", bbox.lon_min.to_string()),
            ("lomax", bbox.lon_max.to_string()),
        ];
        info!(feed = %FeedKind::Aircraft, url = %self.url, ?bbox, "fetching feed");

        let bytes = self
            .client
            .get_bytes(&self.url, &query)
            .await
            .map_err(|e| FeedError::Unavailable {
                feed: FeedKind::Aircraft,
                reason: e.to_string(),
            })?;

        let body = String::from_utf8(bytes).map_err(|_| FeedError::Parse {
            feed: FeedKind::Aircraft,
            reason: "response was not valid UTF-8".to_string(),
        })?;

        let decoded = decode_states(&body).map_err(|e| FeedError::Parse {
            feed: FeedKind::Aircraft,
            reason: e.to_string(),
        })?;

        // Incomplete state vectors are routine upstream; keep them out of the
        // default log level.
        for skip in &decoded.skipped {
            debug!(index = skip.index, reason = %skip.reason, "skipping aircraft");
        }
        info!(
            feed = %FeedKind::Aircraft,
            aircraft = decoded.records.len(),
            skipped = decoded.skipped.len(),
            "feed decoded"
        );

        Ok(decoded.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchError;
    use crate::testing::CannedClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    fn bbox() -> GeoBounds {
        GeoBounds::new(30.539508, 62.8764788, -37.5116545, 78.4397979)
    }

    #[tokio::test]
    async fn sends_bbox_as_query_parameters() {
        let adapter = AircraftFeedAdapter::new(CannedClient::body("{\"states\": null}"), "http://a");
        adapter.fetch_aircraft(bbox()).await.expect("aircraft");

        let requests = adapter.client.requests.lock().unwrap();
        assert_eq!(
            requests[0].1,
            vec![
                ("lamin".to_string(), "30.539508".to_string()),
                ("lamax".to_string(), "62.8764788".to_string()),
                ("lomin".to_string(), "-37.5116545".to_string()),
                ("lomax".to_string(), "78.4397979".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn null_states_is_empty_not_an_error() {
        let adapter = AircraftFeedAdapter::new(
            CannedClient::body("{\"time\": 1700000000, \"states\": null}"),
            "u",
        );
        assert!(adapter.fetch_aircraft(bbox()).await.expect("ok").is_empty());
    }

    #[tokio::test]
    async fn incomplete_rows_are_dropped() {
        let body = json!({ "states": [
            ["abc123", "CS1", "Poland", 0, 0, 21.0, 52.2, 0, false, 0, 45.0],
            ["def456", "CS2", "Poland", 0, 0, null, 52.2, 0, false, 0, 45.0],
            ["ghi789", "CS3", "Poland"]
        ]})
        .to_string();
        let adapter = AircraftFeedAdapter::new(CannedClient::body(body), "u");

        let states = adapter.fetch_aircraft(bbox()).await.expect("ok");

        assert_eq!(states.len(), 1);
        assert_eq!(states[0].icao24, "abc123");
        assert_eq!(states[0].true_track_deg, 45.0);
    }

    #[tokio::test]
    async fn timeout_is_unavailable() {
        let adapter = AircraftFeedAdapter::new(
            CannedClient::failing(FetchError::Timeout(Duration::from_secs(30))),
            "u",
        );
        let err = adapter.fetch_aircraft(bbox()).await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Unavailable {
                feed: FeedKind::Aircraft,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let adapter = AircraftFeedAdapter::new(CannedClient::body("nope"), "u");
        let err = adapter.fetch_aircraft(bbox()).await.unwrap_err();
        assert_eq!(err.feed(), FeedKind::Aircraft);
        assert!(matches!(err, FeedError::Parse { .. }));
    }
}
