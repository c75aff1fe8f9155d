#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;

pub use client::HuoshanClient;
pub use config::HuoshanClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{ORGANIZATION_HEADER, PROJECT_HEADER};

// HTTP method type taken by `HuoshanClient::request`
pub use reqwest::Method;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
