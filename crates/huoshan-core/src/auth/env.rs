//! Environment provider trait for testable credential resolution.

/// API key variables, highest priority first.
///
/// The list reflects historical renames; all of them are still honoured.
pub const API_KEY_VARS: &[&str] = &[
    "OPENAI_KEY",
    "OPENAI_API_KEY",
    "OPENAI_SECRET_KEY",
    "TEST_OPENAI_SECRET_KEY",
];

/// Organization id variables, highest priority first.
pub const ORGANIZATION_ID_VARS: &[&str] = &["OPEN_AI_ORGANIZATION_ID", "OPENAI_ORGANIZATION_ID"];

/// Project id variables, highest priority first.
pub const PROJECT_ID_VARS: &[&str] = &["OPEN_AI_PROJECT_ID", "OPENAI_PROJECT_ID"];

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    /// Get an environment variable as UTF-8, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// Production environment provider that reads from the actual process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Return the first non-blank value among `names`, in order.
pub fn first_non_blank(env: &dyn EnvProvider, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env.var(name))
        .find(|value| !value.trim().is_empty())
}

/// Test/mock environment provider with predefined variables.
#[cfg(test)]
#[derive(Default)]
pub struct MockEnv {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvProvider for MockEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
