use std::time::Duration;

use catmander_core::name_rule::NameRule;

/// Default bound on a single fetch or submit.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default base address of the record service.
pub const DEFAULT_API_URL: &str = "http://localhost:9090/api/v1";

/// Editor configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Base address of the record service; `/cats/...` is appended to it.
    pub api_url: String,
    /// Upper bound on each fetch and submit, after which the session fails
    /// with [`EditorError::Timeout`](crate::error::EditorError::Timeout).
    pub request_timeout: Duration,
    /// Whether a draft with an empty name is rejected before submitting.
    pub name_rule: NameRule,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            name_rule: NameRule::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                          |
    /// |---------------------|----------------------------------|
    /// | `CATS_API_URL`      | `http://localhost:9090/api/v1`   |
    /// | `EDITOR_TIMEOUT_MS` | `10000`                          |
    /// | `CAT_NAME_RULE`     | `allow-empty`                    |
    pub fn from_env() -> Self {
        let api_url = std::env::var("CATS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let request_timeout = std::env::var("EDITOR_TIMEOUT_MS")
            .map(|v| {
                Duration::from_millis(v.parse().expect("EDITOR_TIMEOUT_MS must be a valid u64"))
            })
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let name_rule: NameRule = std::env::var("CAT_NAME_RULE")
            .map(|v| v.parse().expect("CAT_NAME_RULE must be a valid name rule"))
            .unwrap_or_default();

        Self {
            api_url,
            request_timeout,
            name_rule,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_name_rule(mut self, rule: NameRule) -> Self {
        self.name_rule = rule;
        self
    }
}
