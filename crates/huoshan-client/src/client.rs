//! The Huoshan API client.

use std::sync::Arc;

use huoshan_core::{ConnectionSettings, Credential, DefaultCredentials};
use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::HuoshanClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{auth_headers, build_http_client};

/// Client for the Huoshan REST API.
///
/// Holds a shared credential and shared connection settings. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HuoshanClient {
    http: reqwest::Client,
    credential: Arc<Credential>,
    settings: Arc<ConnectionSettings>,
    headers: HeaderMap,
}

impl HuoshanClient {
    /// Create a client from the process-wide default credential and the
    /// shared default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] when no credential can be resolved.
    pub fn new(config: &HuoshanClientConfig) -> ClientResult<Self> {
        Self::from_defaults(
            DefaultCredentials::shared(),
            ConnectionSettings::default_ref(),
            config,
        )
    }

    /// Create a client whose credential comes from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] when `defaults` cannot produce a credential.
    pub fn from_defaults(
        defaults: &DefaultCredentials,
        settings: Arc<ConnectionSettings>,
        config: &HuoshanClientConfig,
    ) -> ClientResult<Self> {
        let credential = defaults.get()?;
        Self::with_parts(credential, settings, config)
    }

    /// Create a client from an explicit credential and settings.
    ///
    /// # Errors
    ///
    /// Fails if a credential field cannot be used as a header value or the
    /// HTTP client cannot be built.
    pub fn with_parts(
        credential: Arc<Credential>,
        settings: Arc<ConnectionSettings>,
        config: &HuoshanClientConfig,
    ) -> ClientResult<Self> {
        let headers = auth_headers(&credential)?;
        let http = build_http_client(config)?;

        debug!(
            endpoint = settings.rest_url_format(),
            credential = ?credential,
            "Created Huoshan client"
        );

        Ok(Self {
            http,
            credential,
            settings,
            headers,
        })
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    #[must_use]
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Absolute REST URL for an endpoint path such as `chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the result does not parse.
    pub fn endpoint_url(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&self.settings.rest_url(path))?)
    }

    /// Absolute WebSocket URL for an endpoint path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the result does not parse.
    pub fn websocket_url(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&self.settings.socket_url(path))?)
    }

    /// Start a request to an endpoint with credential headers and default
    /// query parameters already attached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the endpoint URL does not parse.
    pub fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.endpoint_url(path)?;
        let mut request = self.http.request(method, url).headers(self.headers.clone());

        // Only the resource style deployment mode carries default parameters
        let query = self.settings.default_query_parameters();
        if !query.is_empty() {
            request = request.query(query);
        }
        Ok(request)
    }

    /// GET an endpoint and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status codes and undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path)?;
        self.send_json(request).await
    }

    /// POST a JSON body to an endpoint and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-success status codes and undecodable bodies.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let request = request.build()?;
        let url = request.url().to_string();
        debug!(method = %request.method(), url = %url, "Sending Huoshan request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "Failed to read error response body");
                String::new()
            });
            return Err(ClientError::ApiRequestFailed {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn client_for(domain: Option<&str>) -> HuoshanClient {
        HuoshanClient::with_parts(
            Arc::new(Credential::new("sk-test").with_project("proj_1")),
            Arc::new(ConnectionSettings::build(domain, None).unwrap()),
            &HuoshanClientConfig::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_url_uses_rest_template() {
        let client = client_for(None);
        assert_eq!(
            client.endpoint_url("chat/completions").unwrap().as_str(),
            "https://ark.cn-beijing.volces.com/api/v3/chat/completions"
        );
    }

    #[test]
    fn test_websocket_url_stays_on_public_host() {
        let client = client_for(Some("api.custom.com"));
        assert_eq!(
            client.websocket_url("realtime").unwrap().as_str(),
            "wss://ark.cn-beijing.volces.com/api/v3/realtime"
        );
        assert_eq!(
            client.endpoint_url("models").unwrap().as_str(),
            "https://api.custom.com/v3/models"
        );
    }

    #[test]
    fn test_request_carries_credential_headers() {
        let client = client_for(Some("http://127.0.0.1:9000"));
        let request = client.request(Method::GET, "models").unwrap().build().unwrap();

        assert_eq!(request.url().as_str(), "http://127.0.0.1:9000/v3/models");
        assert!(request.url().query().is_none());
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer sk-test");
        assert_eq!(request.headers()["openai-project"], "proj_1");
        assert!(request.headers().get("openai-organization").is_none());
    }

    #[test]
    fn test_from_defaults_propagates_missing_credential() {
        let defaults = DefaultCredentials::with_source(|| -> Option<Credential> { None });
        let result = HuoshanClient::from_defaults(
            &defaults,
            ConnectionSettings::default_ref(),
            &HuoshanClientConfig::new(),
        );
        assert!(matches!(result, Err(ClientError::Auth(_))));
    }

    #[test]
    fn test_from_defaults_shares_cached_credential() {
        let defaults = DefaultCredentials::new();
        defaults.set(Credential::new("sk-cached"));

        let client = HuoshanClient::from_defaults(
            &defaults,
            ConnectionSettings::default_ref(),
            &HuoshanClientConfig::new(),
        )
        .unwrap();

        assert_eq!(client.credential().api_key(), "sk-cached");
        assert_eq!(client.settings(), &ConnectionSettings::build_default());
    }
}
