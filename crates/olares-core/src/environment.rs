//! Namespace and domain of the current user.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use crate::config::EnvironmentSettings;
use crate::error::{DeployerError, DeployerResult};

/// Placeholder user segment for namespaces without a `-`.
const UNKNOWN_USER: &str = "unknown";

/// Cluster namespace and the user's base domain.
///
/// Discovered once at startup and passed to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub namespace: String,
    pub domain: String,
}

impl Environment {
    /// Build an environment from a known namespace.
    ///
    /// The domain is the last `-` separated segment of the namespace
    /// followed by `domain_suffix`, e.g. `user-space-alice` gives
    /// `alice.olares.com`.
    pub fn new(namespace: impl Into<String>, domain_suffix: &str) -> Self {
        let namespace = namespace.into();
        let user = match namespace.rsplit_once('-') {
            Some((_, last)) => last,
            None => UNKNOWN_USER,
        };
        let domain = format!("{}.{}", user, domain_suffix);
        Self { namespace, domain }
    }

    /// Read the namespace from the mounted credential file.
    ///
    /// A missing or empty file falls back to the configured default
    /// namespace. Any other read failure is an error.
    pub fn discover(settings: &EnvironmentSettings) -> DeployerResult<Self> {
        let path = &settings.namespace_file;
        let namespace = match std::fs::read_to_string(path) {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    settings.default_namespace.clone()
                } else {
                    trimmed.to_string()
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.display(),
                    "Namespace file not found, using default namespace"
                );
                settings.default_namespace.clone()
            }
            Err(source) => {
                return Err(DeployerError::Environment {
                    path: path.clone(),
                    source,
                });
            }
        };

        Ok(Self::new(namespace, &settings.domain_suffix))
    }
}
