//! Configuration management via environment variables
//!
//! Every setting has a preferred `REQLOG_*` name and, where one existed, an
//! older name that is still honoured with a deprecation warning.

use std::path::PathBuf;
use std::time::Duration;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default base URL for the admin "send test request" action
pub const DEFAULT_TEST_REQUEST_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default timeout for outgoing calls, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const DEFAULT_DATA_DIR: &str = ".reqlog";
const DATABASE_FILE: &str = "reqlog.db";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use reqlog::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("REQLOG_PORT", "API_REQUEST_LOGGER_PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Unparseable values fall back to `default`.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Resolve the data directory
///
/// Uses `REQLOG_DATA_DIR` (deprecated: `API_REQUEST_LOGGER_DATA_DIR`), then
/// `~/.reqlog`, then `.reqlog` relative to the working directory.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = get_env_with_fallback("REQLOG_DATA_DIR", "API_REQUEST_LOGGER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(DEFAULT_DATA_DIR))
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolve the database URL
///
/// Uses `REQLOG_DATABASE_URL` (deprecated: `DATABASE_URL`), otherwise
/// `reqlog.db` inside the data directory.
pub fn database_url() -> String {
    get_env_with_fallback("REQLOG_DATABASE_URL", "DATABASE_URL").unwrap_or_else(|| {
        format!("sqlite:{}", data_dir().join(DATABASE_FILE).display())
    })
}

/// Admin API token. `None` (unset or blank) leaves the admin API open.
pub fn admin_token() -> Option<String> {
    get_env_with_fallback("REQLOG_ADMIN_TOKEN", "API_REQUEST_LOGGER_ADMIN_TOKEN")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Server bind configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl ServerConfig {
    /// Load bind configuration from environment variables.
    pub fn from_env() -> Self {
        let host = get_env_with_fallback_or("REQLOG_HOST", "API_REQUEST_LOGGER_HOST", DEFAULT_HOST);
        let port =
            get_env_with_fallback_parse("REQLOG_PORT", "API_REQUEST_LOGGER_PORT", DEFAULT_PORT);
        Self { host, port }
    }

    /// Build from explicit CLI arguments.
    pub fn from_args(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Outgoing HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Per-request timeout for outgoing calls
    pub timeout: Duration,
    /// Base URL used by the admin "send test request" action
    pub test_request_base_url: String,
}

impl HttpClientConfig {
    /// Load client configuration from environment variables.
    pub fn from_env() -> Self {
        let timeout_secs = get_env_with_fallback_parse(
            "REQLOG_HTTP_TIMEOUT_SECS",
            "API_REQUEST_LOGGER_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        );
        let test_request_base_url = get_env_with_fallback_or(
            "REQLOG_TEST_REQUEST_BASE_URL",
            "API_REQUEST_LOGGER_TEST_REQUEST_BASE_URL",
            DEFAULT_TEST_REQUEST_BASE_URL,
        );

        Self {
            timeout: Duration::from_secs(timeout_secs),
            test_request_base_url,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            test_request_base_url: DEFAULT_TEST_REQUEST_BASE_URL.to_string(),
        }
    }
}
