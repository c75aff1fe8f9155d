//! The resolved credential value.

use std::fmt;

/// Number of leading API key characters shown by `Debug`.
const VISIBLE_KEY_PREFIX: usize = 6;

/// API key plus optional organization and project identifiers.
///
/// Immutable once built. Clients share it behind an `Arc`, either the
/// process-wide default or a private instance.
///
/// # Example
///
/// ```
/// use huoshan_core::Credential;
///
/// let credential = Credential::new("sk-test")
///     .with_organization("org-test")
///     .with_project("proj_test");
///
/// assert_eq!(credential.api_key(), "sk-test");
/// assert_eq!(credential.organization_id(), Some("org-test"));
/// assert_eq!(credential.project_id(), Some("proj_test"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential {
    api_key: String,
    organization_id: Option<String>,
    project_id: Option<String>,
}

impl Credential {
    /// Create a credential holding only an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            organization_id: None,
            project_id: None,
        }
    }

    /// Create a credential from a bare API key.
    ///
    /// Equivalent to [`Credential::new`]; named for call sites that convert
    /// a key string into a credential.
    #[must_use]
    pub fn from_key(api_key: impl Into<String>) -> Self {
        Self::new(api_key)
    }

    /// Set the organization id. Blank values clear it.
    #[must_use]
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = non_blank(organization_id.into());
        self
    }

    /// Set the project id. Blank values clear it.
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = non_blank(project_id.into());
        self
    }

    /// Build a credential from optional parts.
    ///
    /// Returns `None` when the API key is missing or blank, so a record
    /// without a key is never treated as found.
    pub(crate) fn from_parts(
        api_key: Option<String>,
        organization_id: Option<String>,
        project_id: Option<String>,
    ) -> Option<Self> {
        let api_key = api_key.and_then(non_blank)?;
        Some(Self {
            api_key,
            organization_id: organization_id.and_then(non_blank),
            project_id: project_id.and_then(non_blank),
        })
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The organization id, if any.
    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    /// The project id, if any.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

/// Build a [`Credential`] from a bare API key.
#[must_use]
pub fn credential_from_key(api_key: impl Into<String>) -> Credential {
    Credential::from_key(api_key)
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.api_key.chars().take(VISIBLE_KEY_PREFIX).collect();
        f.debug_struct("Credential")
            .field("api_key", &format_args!("{visible}***"))
            .field("organization_id", &self.organization_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
