#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod auth;
pub mod settings;

// Re-export commonly used types for convenience
pub use auth::{
    AuthError, CONFIG_FILE_NAME, Credential, CredentialResolver, CredentialSource,
    DefaultCredentials, EnvProvider, ParsedConfig, SystemEnv, credential_from_key, get_default,
    parse_config, set_default,
};
pub use settings::{
    ConnectionSettings, DEFAULT_API_VERSION, PUBLIC_DOMAIN, Protocol, SettingsError,
};

// Silence unused dev-dependency warnings in unit test builds
#[cfg(test)]
use tempfile as _;
