//! Credential resolution for the Huoshan API.
//!
//! A [`Credential`] can come from several places. In priority order:
//! - Explicit values handed to a client
//! - The cached default held by [`DefaultCredentials`]
//! - A `.openai` config file in the working directory or any ancestor
//! - A `.openai` config file in the user's home directory
//! - Environment variables (`OPENAI_API_KEY` and its historical aliases)
//!
//! # Design
//!
//! - "Not found here" is `None`, never an error; only the cached default
//!   fails with [`AuthError::CredentialNotFound`] when every source is empty
//! - Environment access goes through [`EnvProvider`] so tests never touch
//!   the real process environment
//! - Config files are read, never written

mod config_file;
mod credential;
mod default;
mod env;
mod error;
mod resolver;

#[cfg(test)]
mod test_utils;

pub use config_file::{CONFIG_FILE_NAME, ParsedConfig, parse_config};
pub use credential::{Credential, credential_from_key};
pub use default::{CredentialSource, DefaultCredentials, get_default, set_default};
pub use env::{
    API_KEY_VARS, EnvProvider, ORGANIZATION_ID_VARS, PROJECT_ID_VARS, SystemEnv, first_non_blank,
};
pub use error::AuthError;
pub use resolver::CredentialResolver;

#[cfg(test)]
pub use env::MockEnv;
