//! Configuration for the lead store connection

use std::env;
use std::time::Duration;

use tracing::error;
use url::Url;

use crate::error::{Result, StoreError};

/// Endpoint used when no usable project URL is configured. Nothing answers
/// there, so every store call fails.
pub const PLACEHOLDER_URL: &str = "https://placeholder.supabase.co";

/// Key used when no usable anon key is configured
pub const PLACEHOLDER_KEY: &str = "placeholder-key";

const URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];

const URL_TEMPLATE_MARKER: &str = "YOUR_SUPABASE_URL";
const KEY_TEMPLATE_MARKER: &str = "YOUR_SUPABASE_ANON_KEY";

/// Options for the HTTP side of the store client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,

    /// Value of the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
            client_info: concat!("leaddesk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Connection parameters for the hosted backend
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: Url,
    pub anon_key: String,
    pub options: ClientOptions,
}

impl StoreConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(url_str: &str, anon_key: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        if anon_key.is_empty() {
            return Err(StoreError::general("anon key cannot be empty"));
        }
        Ok(Self {
            url,
            anon_key: anon_key.to_string(),
            options: ClientOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Reads the connection parameters from the environment, loading `.env`
    /// first when present.
    ///
    /// Never fails: missing or template values are reported at error level
    /// and replaced by the placeholder endpoint.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::resolve(first_var(&URL_VARS), first_var(&KEY_VARS))
    }

    /// Builds a configuration from raw values, applying the placeholder
    /// fallback.
    pub fn resolve(url: Option<String>, anon_key: Option<String>) -> Self {
        let url = usable(url, URL_TEMPLATE_MARKER);
        let anon_key = usable(anon_key, KEY_TEMPLATE_MARKER);

        if url.is_none() || anon_key.is_none() {
            error!(
                "CRITICAL: Supabase environment variables are missing or default placeholders. \
                 Please check .env and restart."
            );
        }

        let url = match url.as_deref().map(Url::parse) {
            Some(Ok(url)) => url,
            Some(Err(e)) => {
                error!(error = %e, "CRITICAL: Supabase URL is not a valid URL");
                placeholder_url()
            }
            None => placeholder_url(),
        };

        Self {
            url,
            anon_key: anon_key.unwrap_or_else(|| PLACEHOLDER_KEY.to_string()),
            options: ClientOptions::default(),
        }
    }

    /// Whether this configuration points at the unreachable fallback endpoint
    pub fn is_placeholder(&self) -> bool {
        self.url.host_str() == placeholder_url().host_str()
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| env::var(name).ok())
}

fn usable(value: Option<String>, template_marker: &str) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.contains(template_marker))
}

fn placeholder_url() -> Url {
    Url::parse(PLACEHOLDER_URL).expect("placeholder URL is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_valid() {
        let url = "http://localhost:54321";
        let config = StoreConfig::new(url, "dummy-anon-key").unwrap();

        // Url::parse adds a trailing slash when the path is empty
        assert_eq!(config.url.to_string(), format!("{}/", url));
        assert_eq!(config.anon_key, "dummy-anon-key");
        assert!(!config.is_placeholder());
    }

    #[test]
    fn config_new_invalid_url() {
        let config = StoreConfig::new("not a valid url", "some_anon_key");
        match config.err().unwrap() {
            StoreError::Url(_) => {}
            e => panic!("Expected Url error, got {:?}", e),
        }
    }

    #[test]
    fn config_new_empty_key() {
        let config = StoreConfig::new("http://localhost:54321", "");
        match config.err().unwrap() {
            StoreError::General(msg) => assert!(msg.contains("anon key cannot be empty")),
            e => panic!("Expected General error, got {:?}", e),
        }
    }

    #[test]
    fn resolve_keeps_real_values() {
        let config = StoreConfig::resolve(
            Some("https://abc.supabase.co".to_string()),
            Some("anon".to_string()),
        );
        assert_eq!(config.url.as_str(), "https://abc.supabase.co/");
        assert_eq!(config.anon_key, "anon");
        assert!(!config.is_placeholder());
    }

    #[test]
    fn resolve_falls_back_when_missing() {
        let config = StoreConfig::resolve(None, None);
        assert!(config.is_placeholder());
        assert_eq!(config.anon_key, PLACEHOLDER_KEY);
    }

    #[test]
    fn resolve_falls_back_on_template_values() {
        let config = StoreConfig::resolve(
            Some("https://YOUR_SUPABASE_URL.supabase.co".to_string()),
            Some("YOUR_SUPABASE_ANON_KEY".to_string()),
        );
        assert!(config.is_placeholder());
        assert_eq!(config.anon_key, PLACEHOLDER_KEY);
    }

    #[test]
    fn resolve_falls_back_on_unparseable_url() {
        let config = StoreConfig::resolve(Some("::::".to_string()), Some("anon".to_string()));
        assert!(config.is_placeholder());
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn options_builder() {
        let options = ClientOptions::default()
            .with_request_timeout(None)
            .with_db_schema("crm")
            .with_client_info("tests/1.0");
        assert_eq!(options.request_timeout, None);
        assert_eq!(options.db_schema, "crm");
        assert_eq!(options.client_info, "tests/1.0");
    }
}
