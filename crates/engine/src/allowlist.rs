//! Hook-origin allowlist sourced from GitHub's meta endpoint.
//!
//! GitHub publishes the CIDR ranges its hook deliveries originate from at
//! `https://api.github.com/meta` (the `hooks` array). The allowlist is
//! fetched once at startup and never refreshed; a restart picks up upstream
//! changes. A fetch failure is fatal — the service must not fall back to
//! accepting events from arbitrary addresses.

use std::net::IpAddr;

use ipnet::IpNet;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while building the allowlist.
#[derive(Debug, Error)]
pub enum AllowlistError {
    #[error("meta endpoint request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("meta endpoint returned no usable hook ranges")]
    Empty,
}

/// Subset of the GitHub meta document we consume.
#[derive(Debug, Deserialize)]
struct MetaResponse {
    hooks: Vec<String>,
}

/// Immutable set of network ranges authorized to deliver webhooks.
#[derive(Debug, Clone)]
pub struct HookAllowlist {
    networks: Vec<IpNet>,
}

impl HookAllowlist {
    /// Build an allowlist from known ranges.
    pub fn new(networks: Vec<IpNet>) -> Self {
        Self { networks }
    }

    /// Fetch the current hook ranges from the meta endpoint.
    ///
    /// Individual entries that fail to parse as CIDR blocks are logged and
    /// skipped; an empty result is an error.
    pub async fn fetch(client: &reqwest::Client, meta_url: &str) -> Result<Self, AllowlistError> {
        let meta: MetaResponse = client
            .get(meta_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut networks = Vec::with_capacity(meta.hooks.len());
        for entry in &meta.hooks {
            match entry.parse::<IpNet>() {
                Ok(net) => networks.push(net),
                Err(e) => {
                    tracing::warn!(
                        entry = %entry,
                        error = %e,
                        "Skipping unparseable hook range"
                    );
                }
            }
        }

        if networks.is_empty() {
            return Err(AllowlistError::Empty);
        }

        tracing::info!(
            range_count = networks.len(),
            "Loaded GitHub hook ranges"
        );

        Ok(Self::new(networks))
    }

    /// Whether the address falls inside at least one hook range.
    pub fn is_authorized(&self, addr: IpAddr) -> bool {
        self.networks.iter().any(|net| net.contains(&addr))
    }

    /// Number of loaded ranges.
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
