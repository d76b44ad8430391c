use std::sync::Mutex;

use crate::client::{FeedClient, FetchError};

/// Serves a canned response and records every request it receives.
pub(crate) struct CannedClient {
    response: Result<Vec<u8>, FetchError>,
    pub(crate) requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl CannedClient {
    pub(crate) fn body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(body.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: FetchError) -> Self {
        Self {
            response: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl FeedClient for CannedClient {
    async fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));
        self.response.clone()
    }
}
