use anyhow::{Context, Result};
use url::Url;

pub const APP_ID: &str = "com.penpal.Penpal";
pub const APP_NAME: &str = "Penpal";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the backend location.
pub const API_URL_ENV: &str = "PENPAL_API_URL";
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Where the backend lives. Built once at startup and handed explicitly to
/// everything that talks to the server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    url: Url,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_URL_ENV) {
            Ok(raw) => Self::new(&raw),
            Err(_) => Self::new(DEFAULT_API_BASE),
        }
    }

    pub fn new(raw: &str) -> Result<Self> {
        let url =
            Url::parse(raw).with_context(|| format!("invalid API base URL: {}", raw))?;
        Ok(Self { url })
    }

    /// API base without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.url.as_str().trim_end_matches('/')
    }

    /// The server root, one level above the API base. The health probe
    /// lives there.
    pub fn server_root(&self) -> Url {
        let mut root = self.url.clone();
        root.set_path("/");
        root
    }
}
