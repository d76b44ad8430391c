//! Feed adapters for the frontline and aircraft sources.
//!
//! ```text
//! FrontlineFeedAdapter ──┐
//!                        ├── FeedClient trait → HttpFeedClient (reqwest)
//! AircraftFeedAdapter ───┘
//! ```
//!
//! Adapters own the URL and the decode step; the client only moves bytes.
//! Feed-level failures surface as [`FeedError`]; individual bad records are
//! logged and dropped.

mod aircraft;
mod client;
mod error;
mod frontline;
#[cfg(test)]
mod testing;

pub use aircraft::{AircraftFeedAdapter, DEFAULT_AIRCRAFT_URL};
pub use client::{DEFAULT_FETCH_TIMEOUT, FeedClient, FetchError, HttpFeedClient};
pub use error::{FeedError, FeedKind};
pub use frontline::{DEFAULT_FRONTLINE_URL, FrontlineFeedAdapter};
