//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BREW_HAVEN_HOST` - Bind address (default: 127.0.0.1)
//! - `BREW_HAVEN_PORT` - Listen port (default: 3000)
//! - `BREW_HAVEN_BASE_URL` - Public URL of the site (default: <http://localhost:3000>)
//! - `BREW_HAVEN_DATABASE_URL` - `PostgreSQL` connection string for contact
//!   submissions; falls back to `DATABASE_URL`, then to an in-memory store
//! - `CONTACT_ENDPOINT_URL` - Where the contact form posts (default: `<base_url>/api/contact`)
//! - `CONTACT_TIMEOUT_SECS` - Contact request timeout in seconds (default: 10)
//! - `BREW_HAVEN_CONTENT_DIR` - Directory holding `catalog.json` (default: crates/storefront/content)
//! - `BREW_HAVEN_STATIC_DIR` - Directory served under `/static` (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_CONTACT_TIMEOUT_SECS: &str = "10";
const DEFAULT_CONTENT_DIR: &str = "crates/storefront/content";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: Url,
    /// `PostgreSQL` URL for contact submissions (contains password)
    pub database_url: Option<SecretString>,
    /// Contact form forwarding
    pub contact: ContactConfig,
    /// Directory holding the catalog content file
    pub content_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: String,
}

/// Where and how the contact form submits.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env
            .or_default("BREW_HAVEN_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BREW_HAVEN_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("BREW_HAVEN_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BREW_HAVEN_PORT".to_string(), e.to_string()))?;
        let base_url = parse_url("BREW_HAVEN_BASE_URL", &env.or_default("BREW_HAVEN_BASE_URL", DEFAULT_BASE_URL))?;

        let database_url = env
            .optional("BREW_HAVEN_DATABASE_URL")
            .or_else(|| env.optional("DATABASE_URL"))
            .map(SecretString::from);

        let contact = ContactConfig::from_env(&env, &base_url)?;
        let content_dir = PathBuf::from(env.or_default("BREW_HAVEN_CONTENT_DIR", DEFAULT_CONTENT_DIR));
        let static_dir = PathBuf::from(env.or_default("BREW_HAVEN_STATIC_DIR", DEFAULT_STATIC_DIR));
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.or_default("SENTRY_ENVIRONMENT", "development");

        Ok(Self {
            host,
            port,
            base_url,
            database_url,
            contact,
            content_dir,
            static_dir,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (controls the secure cookie flag).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl ContactConfig {
    fn from_env<F>(env: &Env<F>, base_url: &Url) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match env.optional("CONTACT_ENDPOINT_URL") {
            Some(raw) => parse_url("CONTACT_ENDPOINT_URL", &raw)?,
            None => base_url.join("/api/contact").map_err(|e| {
                ConfigError::InvalidEnvVar("BREW_HAVEN_BASE_URL".to_string(), e.to_string())
            })?,
        };

        let secs = env
            .or_default("CONTACT_TIMEOUT_SECS", DEFAULT_CONTACT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONTACT_TIMEOUT_SECS".to_string(), e.to_string()))?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CONTACT_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source; empty values count as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert!(config.database_url.is_none());
        assert_eq!(
            config.contact.endpoint.as_str(),
            "http://localhost:3000/api/contact"
        );
        assert_eq!(config.contact.timeout, Duration::from_secs(10));
        assert_eq!(config.content_dir, PathBuf::from("crates/storefront/content"));
        assert!(!config.is_https());
    }

    #[test]
    fn test_database_url_falls_back_to_generic_var() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/brew")]).unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://localhost/brew"
        );

        let config = load(&[
            ("BREW_HAVEN_DATABASE_URL", "postgres://localhost/primary"),
            ("DATABASE_URL", "postgres://localhost/generic"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://localhost/primary"
        );
    }

    #[test]
    fn test_contact_endpoint_follows_base_url() {
        let config = load(&[("BREW_HAVEN_BASE_URL", "https://brewhaven.com/shop/")]).unwrap();
        assert_eq!(
            config.contact.endpoint.as_str(),
            "https://brewhaven.com/api/contact"
        );
        assert!(config.is_https());

        let config = load(&[("CONTACT_ENDPOINT_URL", "http://backend:8000/api/contact")]).unwrap();
        assert_eq!(config.contact.endpoint.host_str(), Some("backend"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("BREW_HAVEN_PORT", "not-a-port")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "BREW_HAVEN_PORT"
        ));
        assert!(matches!(
            load(&[("BREW_HAVEN_BASE_URL", "ftp://brewhaven.com")]),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(matches!(
            load(&[("CONTACT_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "CONTACT_TIMEOUT_SECS"
        ));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("BREW_HAVEN_PORT", "  "), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
    }
}
