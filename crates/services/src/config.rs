use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the tutoring backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if the url does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read `TUTOR_API_URL` and `TUTOR_API_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("TUTOR_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let mut config = Self::new(&raw_url)?;
        if let Ok(raw) = env::var("TUTOR_API_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&raw)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute url for an `/api/...` path, keeping any base path prefix.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the joined url is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        raw: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

/// Parse a timeout in whole seconds.
///
/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` for non-numeric or zero values.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_path_prefix() {
        let config = ApiConfig::new("https://tutor.example.com/backend/").unwrap();
        let url = config.endpoint("/api/topics").unwrap();
        assert_eq!(url.as_str(), "https://tutor.example.com/backend/api/topics");
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = ApiConfig::new(DEFAULT_API_URL).unwrap();
        let url = config.endpoint("/api/progress-summary").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/progress-summary");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn timeout_must_be_positive_seconds() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
