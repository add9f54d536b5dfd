//! Host configuration.
//!
//! Leptos options come from `[package.metadata.leptos]` (or the `LEPTOS_*`
//! variables cargo-leptos exports); `LEARNMART_SITE_ADDR` and
//! `LEARNMART_SITE_ROOT` override the bind address and static root.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::SocketAddr;

use leptos::prelude::LeptosOptions;

pub const SITE_ADDR_VAR: &str = "LEARNMART_SITE_ADDR";
pub const SITE_ROOT_VAR: &str = "LEARNMART_SITE_ROOT";

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid {SITE_ADDR_VAR} {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

/// Overrides applied on top of the Leptos options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostConfig {
    pub site_addr: Option<SocketAddr>,
    pub site_root: Option<String>,
}

impl HostConfig {
    /// Read overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidAddr`] when the address override does not parse.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidAddr`] when the address override does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let site_addr = match non_blank(SITE_ADDR_VAR) {
            Some(value) => Some(
                value
                    .parse::<SocketAddr>()
                    .map_err(|source| HostError::InvalidAddr { value, source })?,
            ),
            None => None,
        };
        Ok(Self { site_addr, site_root: non_blank(SITE_ROOT_VAR) })
    }

    pub fn apply(&self, options: &mut LeptosOptions) {
        if let Some(addr) = self.site_addr {
            options.site_addr = addr;
        }
        if let Some(root) = &self.site_root {
            options.site_root = root.as_str().into();
        }
    }
}
