//! Connection settings and URL templates.
//!
//! [`ConnectionSettings`] derives the REST and WebSocket URL templates once,
//! at construction, so per-call code only substitutes a relative path into
//! the `{0}` placeholder.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Public API host (with its path prefix), without a scheme.
pub const PUBLIC_DOMAIN: &str = "ark.cn-beijing.volces.com/api";

/// API version used when none is given.
pub const DEFAULT_API_VERSION: &str = "v3";

/// Placeholder substituted with the per-call path.
const PATH_PLACEHOLDER: &str = "{0}";

const WSS: &str = "wss://";

static DEFAULT_SETTINGS: LazyLock<Arc<ConnectionSettings>> =
    LazyLock::new(|| Arc::new(ConnectionSettings::build_default()));

/// Scheme used for REST calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    /// The scheme prefix, e.g. `https://`.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }

    /// Split a leading `http://` or `https://` off `domain`.
    ///
    /// Defaults to [`Protocol::Https`] when no scheme is present.
    fn strip(domain: &str) -> (Self, &str) {
        if let Some(rest) = domain.strip_prefix(Self::Http.prefix()) {
            (Self::Http, rest)
        } else if let Some(rest) = domain.strip_prefix(Self::Https.prefix()) {
            (Self::Https, rest)
        } else {
            (Self::Https, domain)
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The domain has neither `.` nor `:`, so it looks like a bare resource
    /// name rather than a host.
    #[error(
        "'{0}' looks like a resource name, not a domain. Pass a host such as \
         'api.example.com' or 'localhost:8080'"
    )]
    ResourceNameAsDomain(String),
}

/// Immutable endpoint configuration for the Huoshan API.
///
/// # Example
///
/// ```
/// use huoshan_core::ConnectionSettings;
///
/// let settings = ConnectionSettings::build_default();
/// assert_eq!(
///     settings.rest_url_format(),
///     "https://ark.cn-beijing.volces.com/api/v3/{0}"
/// );
/// assert_eq!(
///     settings.socket_url("realtime"),
///     "wss://ark.cn-beijing.volces.com/api/v3/realtime"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    protocol: Protocol,
    resource_base: String,
    api_version: String,
    deployment_id: String,
    base_path: String,
    rest_url_format: String,
    socket_url_format: String,
    use_token_auth: bool,
    default_query_parameters: BTreeMap<String, String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::build_default()
    }
}

impl ConnectionSettings {
    /// Settings for the public endpoint.
    pub fn build_default() -> Self {
        Self::compose(Protocol::Https, PUBLIC_DOMAIN, DEFAULT_API_VERSION)
    }

    /// The shared public-endpoint settings.
    pub fn default_ref() -> Arc<Self> {
        Arc::clone(&DEFAULT_SETTINGS)
    }

    /// Settings for a custom domain and/or API version.
    ///
    /// - A missing or blank `domain` selects the public endpoint.
    /// - A leading `http://` or `https://` picks the REST scheme (default
    ///   `https`).
    /// - A missing or blank `api_version` selects [`DEFAULT_API_VERSION`].
    ///
    /// The WebSocket template always targets the public endpoint: streaming
    /// connections are not retargeted to custom domains.
    pub fn build(domain: Option<&str>, api_version: Option<&str>) -> Result<Self, SettingsError> {
        let domain = domain.map(str::trim).filter(|d| !d.is_empty());
        let api_version = api_version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_VERSION);

        let Some(domain) = domain else {
            return Ok(Self::compose(Protocol::Https, PUBLIC_DOMAIN, api_version));
        };

        if !domain.contains(['.', ':']) {
            return Err(SettingsError::ResourceNameAsDomain(domain.to_string()));
        }

        let (protocol, host) = Protocol::strip(domain);
        let settings = Self::compose(protocol, host.trim_end_matches('/'), api_version);
        tracing::debug!(rest = %settings.rest_url_format, "Using custom API domain");
        Ok(settings)
    }

    fn compose(protocol: Protocol, host: &str, api_version: &str) -> Self {
        let resource_base = format!("{}{host}", protocol.prefix());
        let base_path = format!("/{api_version}/");
        let rest_url_format = format!("{resource_base}{base_path}{PATH_PLACEHOLDER}");
        let socket_url_format = format!("{WSS}{PUBLIC_DOMAIN}{base_path}{PATH_PLACEHOLDER}");

        Self {
            protocol,
            resource_base,
            api_version: api_version.to_string(),
            deployment_id: String::new(),
            base_path,
            rest_url_format,
            socket_url_format,
            use_token_auth: true,
            default_query_parameters: BTreeMap::new(),
        }
    }

    /// Scheme used for REST calls.
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Scheme plus host, e.g. `https://api.example.com`.
    pub fn resource_base(&self) -> &str {
        &self.resource_base
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Deployment id; empty for the public and custom-domain endpoints.
    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    /// `/{api_version}/`
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// REST template with a single `{0}` placeholder.
    pub fn rest_url_format(&self) -> &str {
        &self.rest_url_format
    }

    /// WebSocket template with a single `{0}` placeholder.
    pub fn socket_url_format(&self) -> &str {
        &self.socket_url_format
    }

    /// Whether the API key is sent as a bearer token.
    pub const fn use_token_auth(&self) -> bool {
        self.use_token_auth
    }

    /// Query parameters appended to every request.
    ///
    /// Empty for the public and custom-domain endpoints; only the resource
    /// style deployment mode (`api-version=...`) would fill it.
    pub const fn default_query_parameters(&self) -> &BTreeMap<String, String> {
        &self.default_query_parameters
    }

    /// Full REST URL for a relative endpoint path such as `chat/completions`.
    pub fn rest_url(&self, path: &str) -> String {
        self.rest_url_format
            .replace(PATH_PLACEHOLDER, path.trim_start_matches('/'))
    }

    /// Full WebSocket URL for a relative endpoint path.
    pub fn socket_url(&self, path: &str) -> String {
        self.socket_url_format
            .replace(PATH_PLACEHOLDER, path.trim_start_matches('/'))
    }
}

impl fmt::Display for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rest_url_format)
    }
}
