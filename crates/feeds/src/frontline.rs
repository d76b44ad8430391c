use formats::{GeoFeature, decode_frontline};
use tracing::{info, warn};

use crate::client::FeedClient;
use crate::error::{FeedError, FeedKind};

pub const DEFAULT_FRONTLINE_URL: &str = "https://deepstatemap.live/api/history/last";

/// Fetches the battlefront geojson document and returns its features with
/// every string property brace-sanitized.
pub struct FrontlineFeedAdapter<C> {
    client: C,
    url: String,
}

impl<C: FeedClient> FrontlineFeedAdapter<C> {
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn fetch_frontline_features(&self) -> Result<Vec<GeoFeature>, FeedError> {
        info!(feed = %FeedKind::Frontline, url = %self.url, "fetching feed");

        let bytes = self
            .client
            .get_bytes(&self.url, &[])
            .await
            .map_err(|e| FeedError::Unavailable {
                feed: FeedKind::Frontline,
                reason: e.to_string(),
            })?;

        let body = String::from_utf8(bytes).map_err(|_| FeedError::Parse {
            feed: FeedKind::Frontline,
            reason: "response was not valid UTF-8".to_string(),
        })?;

        let decoded = decode_frontline(&body).map_err(|e| FeedError::Parse {
            feed: FeedKind::Frontline,
            reason: e.to_string(),
        })?;

        for skip in &decoded.skipped {
            warn!(
                feed = %FeedKind::Frontline,
                index = skip.index,
                reason = %skip.reason,
                "skipping feature"
            );
        }
        info!(
            feed = %FeedKind::Frontline,
            features = decoded.records.len(),
            skipped = decoded.skipped.len(),
            "feed decoded"
        );

        Ok(decoded.records)
    }
}
