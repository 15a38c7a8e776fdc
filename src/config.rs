//! Credentials, client settings, and the shared session object.
//!
//! A [`FlowSession`] is built once at process start and handed to services by
//! reference. Nothing in the crate reads the process environment lazily.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the session token.
pub const ACCESS_TOKEN_VAR: &str = "FLOW_ACCESS_TOKEN";
/// Environment variable holding the caller's user id.
pub const USER_ID_VAR: &str = "FLOW_USER_ID";
/// Environment variable holding the caller's org id.
pub const ORG_ID_VAR: &str = "FLOW_USE_INTT_ID";
/// Environment variable overriding the platform base URL.
pub const BASE_URL_VAR: &str = "FLOW_BASE_URL";
/// Environment variable overriding the per-call timeout in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "FLOW_REQUEST_TIMEOUT_SECS";
/// Environment variable overriding the embedded remark page size.
pub const REMARK_PAGE_SIZE_VAR: &str = "FLOW_REMARK_PAGE_SIZE";

/// Default platform base URL.
pub const DEFAULT_BASE_URL: &str = "https://flow.team";
/// Default per-call timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of remarks requested with the post detail.
pub const DEFAULT_REMARK_PAGE_SIZE: u32 = 100;

/// Errors returned while building configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required configuration value: {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value as supplied.
        value: String,
    },
}

/// Opaque caller credentials, immutable for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    user_id: String,
    org_id: String,
}

impl Credentials {
    /// Creates credentials from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when any value is blank.
    pub fn new(
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            access_token: non_blank(access_token.into(), ACCESS_TOKEN_VAR)?,
            user_id: non_blank(user_id.into(), USER_ID_VAR)?,
            org_id: non_blank(org_id.into(), ORG_ID_VAR)?,
        })
    }

    /// Loads credentials through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(
            lookup(ACCESS_TOKEN_VAR).ok_or(ConfigError::Missing(ACCESS_TOKEN_VAR))?,
            lookup(USER_ID_VAR).ok_or(ConfigError::Missing(USER_ID_VAR))?,
            lookup(ORG_ID_VAR).ok_or(ConfigError::Missing(ORG_ID_VAR))?,
        )
    }

    /// Session token sent inside every request body.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Caller user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Caller org id.
    #[must_use]
    pub fn org_id(&self) -> &str {
        &self.org_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("org_id", &self.org_id)
            .finish()
    }
}

fn non_blank(value: String, name: &'static str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(trimmed.to_owned())
}

/// Client settings for talking to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowClientConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Per-call timeout applied by the HTTP adapter.
    pub request_timeout: Duration,
    /// Remarks requested alongside the post detail.
    pub remark_page_size: u32,
}

impl Default for FlowClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            remark_page_size: DEFAULT_REMARK_PAGE_SIZE,
        }
    }
}

impl FlowClientConfig {
    /// Loads settings through a variable lookup function, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric override does not parse
    /// or is zero, or when the base URL is not an absolute `http(s)` URL usable
    /// as a request header.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            config.base_url = validate_base_url(&base_url)?;
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            config.request_timeout = Duration::from_secs(parse_positive(&raw, REQUEST_TIMEOUT_VAR)?);
        }
        if let Some(raw) = lookup(REMARK_PAGE_SIZE_VAR) {
            let size = parse_positive(&raw, REMARK_PAGE_SIZE_VAR)?;
            config.remark_page_size = u32::try_from(size).map_err(|_| ConfigError::Invalid {
                name: REMARK_PAGE_SIZE_VAR,
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the embedded remark page size.
    #[must_use]
    pub const fn with_remark_page_size(mut self, size: u32) -> Self {
        self.remark_page_size = size;
        self
    }
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let base_url = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::Invalid {
        name: BASE_URL_VAR,
        value: raw.to_owned(),
    };
    let parsed = reqwest::Url::parse(base_url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    reqwest::header::HeaderValue::from_str(&format!("{base_url}/main.act"))
        .map_err(|_| invalid())?;
    Ok(base_url.to_owned())
}

fn parse_positive(raw: &str, name: &'static str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_owned(),
        }),
    }
}

/// Process-wide session: credentials plus client settings.
#[derive(Debug, Clone)]
pub struct FlowSession {
    credentials: Arc<Credentials>,
    config: Arc<FlowClientConfig>,
}

impl FlowSession {
    /// Creates a session from prepared values.
    #[must_use]
    pub fn new(credentials: Credentials, config: FlowClientConfig) -> Self {
        Self {
            credentials: Arc::new(credentials),
            config: Arc::new(config),
        }
    }

    /// Loads a session from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when credentials are missing or overrides are
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |name: &str| std::env::var(name).ok();
        Ok(Self::new(
            Credentials::from_lookup(lookup)?,
            FlowClientConfig::from_lookup(lookup)?,
        ))
    }

    /// Shared handle to the caller credentials.
    #[must_use]
    pub fn credentials_handle(&self) -> Arc<Credentials> {
        Arc::clone(&self.credentials)
    }

    /// Client settings.
    #[must_use]
    pub fn config(&self) -> &FlowClientConfig {
        &self.config
    }
}
