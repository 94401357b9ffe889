//! Transport configuration

/// Base URL of the public GroupMe v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.groupme.com/v3";

/// Environment variable that overrides the base URL
pub const BASE_URL_ENV: &str = "GROUPME_API_URL";

/// Configuration for a [`super::Transport`]
///
/// Networking uses platform defaults: no custom timeout, proxy or TLS
/// settings. Deadlines are the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Base URL that resource paths are joined onto
    pub base_url: String,
    /// Optional User-Agent header value
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
        }
    }
}

impl TransportConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        TransportConfig {
            base_url: base_url.into(),
            user_agent: None,
        }
    }

    /// Default configuration, with the base URL taken from `GROUPME_API_URL` when set
    pub fn from_env() -> Self {
        Self::from_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// Default configuration unless `url` holds a non-blank override
    fn from_base_url_override(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => TransportConfig::new(url.trim()),
            _ => TransportConfig::default(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
