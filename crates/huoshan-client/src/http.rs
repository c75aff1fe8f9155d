//! Request plumbing: the `reqwest` client and credential headers.

use huoshan_core::Credential;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::config::HuoshanClientConfig;
use crate::error::{ClientError, ClientResult};

/// Header carrying the organization id.
pub const ORGANIZATION_HEADER: &str = "openai-organization";

/// Header carrying the project id.
pub const PROJECT_HEADER: &str = "openai-project";

/// Build the underlying HTTP client from configuration.
pub(crate) fn build_http_client(config: &HuoshanClientConfig) -> ClientResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Headers identifying the caller for every request.
///
/// The bearer token is marked sensitive so it never shows up in debug output.
pub(crate) fn auth_headers(credential: &Credential) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut bearer = header_value("api_key", &format!("Bearer {}", credential.api_key()))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    if let Some(organization_id) = credential.organization_id() {
        headers.insert(
            HeaderName::from_static(ORGANIZATION_HEADER),
            header_value("organization_id", organization_id)?,
        );
    }
    if let Some(project_id) = credential.project_id() {
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value("project_id", project_id)?,
        );
    }

    Ok(headers)
}

fn header_value(field: &'static str, value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_only_credential_sends_bearer() {
        let headers = auth_headers(&Credential::new("sk-abc")).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[AUTHORIZATION], "Bearer sk-abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_organization_and_project_headers() {
        let credential = Credential::new("sk-abc")
            .with_organization("org-1")
            .with_project("proj_2");
        let headers = auth_headers(&credential).unwrap();

        assert_eq!(headers[ORGANIZATION_HEADER], "org-1");
        assert_eq!(headers[PROJECT_HEADER], "proj_2");
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let credential = Credential::new("sk-abc").with_organization("org\n1");
        let err = auth_headers(&credential).unwrap_err();

        assert!(matches!(
            err,
            ClientError::InvalidHeader {
                field: "organization_id"
            }
        ));
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&HuoshanClientConfig::new()).is_ok());
    }
}
