//! Repository registry — static per-repository notification configuration.
//!
//! Loaded once at startup from a JSON file mapping repository full names to
//! their target channel and optional message-format overrides:
//!
//! ```json
//! {
//!     "acme/widgets": { "channel": "#releases" },
//!     "acme/gadgets": {
//!         "channel": "#gadgets",
//!         "star_format": "{actor} starred {repo} ({count})"
//!     }
//! }
//! ```
//!
//! A repository absent from the registry is not authorized to produce
//! notifications. Templates are parsed here so bad placeholders fail the
//! load, not a later delivery.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use skyhook_common::template::{MessageTemplate, TemplateError};

/// Errors raised while loading the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid template for '{repo}': {source}")]
    Template {
        repo: String,
        #[source]
        source: TemplateError,
    },
}

/// Raw per-repository entry as it appears in the config file.
#[derive(Debug, Clone, Deserialize)]
struct RawRepoConfig {
    channel: String,
    star_format: Option<String>,
    fork_format: Option<String>,
}

/// Validated notification configuration for one repository.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    /// Target chat channel, e.g. "#releases"
    pub channel: String,
    pub star_template: MessageTemplate,
    pub fork_template: MessageTemplate,
}

/// Read-only map of registered repositories.
#[derive(Debug, Clone)]
pub struct RepoRegistry {
    repos: HashMap<String, RepoConfig>,
}

impl RepoRegistry {
    /// Load and validate the registry from a JSON file.
    pub fn from_path(path: &str) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&contents)?;
        tracing::info!(
            path = %path,
            repo_count = registry.len(),
            "Loaded repository registry"
        );
        Ok(registry)
    }

    /// Parse the registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: HashMap<String, RawRepoConfig> = serde_json::from_str(json)?;

        let mut repos = HashMap::with_capacity(raw.len());
        for (full_name, entry) in raw {
            let star_template = match &entry.star_format {
                Some(format) => {
                    MessageTemplate::parse(format).map_err(|source| RegistryError::Template {
                        repo: full_name.clone(),
                        source,
                    })?
                }
                None => MessageTemplate::default_star(),
            };
            let fork_template = match &entry.fork_format {
                Some(format) => {
                    MessageTemplate::parse(format).map_err(|source| RegistryError::Template {
                        repo: full_name.clone(),
                        source,
                    })?
                }
                None => MessageTemplate::default_fork(),
            };

            repos.insert(
                full_name,
                RepoConfig {
                    channel: entry.channel,
                    star_template,
                    fork_template,
                },
            );
        }

        Ok(Self { repos })
    }

    /// Look up a repository's configuration by full name.
    pub fn resolve(&self, full_name: &str) -> Option<&RepoConfig> {
        self.repos.get(full_name)
    }

    /// Whether the repository is registered.
    pub fn contains(&self, full_name: &str) -> bool {
        self.repos.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyhook_common::types::{EventKind, NotificationJob};

    #[test]
    fn test_load_minimal_registry() {
        let registry =
            RepoRegistry::from_json(r##"{"acme/widgets": {"channel": "#releases"}}"##).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("acme/widgets"));
        assert!(!registry.contains("acme/gadgets"));

        let config = registry.resolve("acme/widgets").unwrap();
        assert_eq!(config.channel, "#releases");
    }

    #[test]
    fn test_default_templates_applied() {
        let registry =
            RepoRegistry::from_json(r##"{"acme/widgets": {"channel": "#releases"}}"##).unwrap();
        let config = registry.resolve("acme/widgets").unwrap();

        let job = NotificationJob::new(
            EventKind::Star,
            "acme/widgets",
            "https://github.com/acme/widgets",
            "alice",
            "https://github.com/alice",
            7,
        );
        let message = config.star_template.render(&job);
        assert!(message.contains("starred"));
        assert!(message.contains("★ 7"));
    }

    #[test]
    fn test_custom_format_overrides_default() {
        let registry = RepoRegistry::from_json(
            r##"{"acme/widgets": {"channel": "#releases", "fork_format": "{actor} made fork #{count}"}}"##,
        )
        .unwrap();
        let config = registry.resolve("acme/widgets").unwrap();

        let job = NotificationJob::new(
            EventKind::Fork,
            "acme/widgets",
            "https://github.com/acme/widgets",
            "bob",
            "https://github.com/bob",
            3,
        );
        assert_eq!(config.fork_template.render(&job), "bob made fork #3");
        // Star template stays the default
        assert!(config.star_template.render(&job).contains("starred"));
    }

    #[test]
    fn test_bad_template_fails_load() {
        let err = RepoRegistry::from_json(
            r##"{"acme/widgets": {"channel": "#releases", "star_format": "{stars}"}}"##,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Template { .. }));
        assert!(err.to_string().contains("acme/widgets"));
    }

    #[test]
    fn test_invalid_json_fails_load() {
        let err = RepoRegistry::from_json("not json").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_empty_registry() {
        let registry = RepoRegistry::from_json("{}").unwrap();
        assert!(registry.is_empty());
        assert!(registry.resolve("anything").is_none());
    }
}
