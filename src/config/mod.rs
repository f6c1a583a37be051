use std::env;

/// Default relay used to re-issue direct fetches server-side when the
/// caller opts in (`relay=true`). The encoded target URL is appended as-is.
pub const DEFAULT_RELAY_BASE: &str = "https://corsproxy.io/?";

/// Default remote metadata-extraction service for delegated fetches.
pub const DEFAULT_METADATA_SERVICE: &str = "https://proxy.fabian-kleine.dev/api/metadata";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub relay_base: String,
    pub metadata_service_url: String,
    pub is_dev: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            relay_base: env::var("RELAY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_RELAY_BASE.to_string()),
            metadata_service_url: env::var("METADATA_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_METADATA_SERVICE.to_string()),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
