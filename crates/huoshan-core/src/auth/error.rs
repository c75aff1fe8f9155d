//! Credential error types.

use thiserror::Error;

/// Errors raised while obtaining credentials.
///
/// Individual resolution steps report "not found" as `None`; this type is
/// reserved for callers that depend on a credential existing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No config file, home directory file or environment variable yielded
    /// a usable API key.
    #[error(
        "Failed to load a valid API key: no .openai config file and no OPENAI_API_KEY \
         (or alias) environment variable was found"
    )]
    CredentialNotFound,
}
