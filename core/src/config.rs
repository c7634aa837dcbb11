//! Client configuration.

use crate::client::TodoClient;

/// API root used when nothing overrides it. The page is served by the same
/// origin as the API, so a relative path works in the browser.
pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Builds a config from an optional override such as a build-time
    /// environment variable. Blank values fall back to the default.
    pub fn from_override(api_base: Option<&str>) -> Self {
        match api_base.map(str::trim).filter(|base| !base.is_empty()) {
            Some(base) => {
                log::info!("using API base {base}");
                Self::new(base)
            }
            None => {
                log::debug!("API base not set, using default: {DEFAULT_API_BASE}");
                Self::default()
            }
        }
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::new(&self.api_base)
    }
}
