use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; LinkpeekBot/1.0; +https://github.com/linkpeek/linkpeek)";

/// Shared application state passed to all handlers.
/// The HTTP client is built once at startup (connection pooling, timeout,
/// user-agent) rather than per request.
#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub relay_base: Arc<str>,
    pub metadata_service_url: Arc<str>,
}

impl AppState {
    pub fn new(relay_base: &str, metadata_service_url: &str) -> Self {
        let http_client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        AppState {
            http_client,
            relay_base: Arc::from(relay_base),
            metadata_service_url: Arc::from(metadata_service_url),
        }
    }
}
