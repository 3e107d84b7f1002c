//! Settings schema for deployer.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Locations of the external tools
    #[serde(default)]
    pub tools: ToolPaths,

    /// Namespace and domain conventions
    #[serde(default)]
    pub environment: EnvironmentSettings,
}

/// Paths of the external executables the deployer shells out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    /// Cluster query tool
    pub kubectl: PathBuf,
    /// Deploy script: `<app> <image> <port> [command]`
    pub deploy: PathBuf,
    /// Manage script: `info|list|logs|delete`
    pub manage: PathBuf,
    /// URL listing script
    pub urls: PathBuf,
    /// Optional environment init script, run once at startup if present
    pub init: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            kubectl: PathBuf::from("/tmp/kubectl"),
            deploy: PathBuf::from("/root/.local/bin/olares-deploy"),
            manage: PathBuf::from("/root/.local/bin/olares-manage"),
            urls: PathBuf::from("/root/.local/bin/olares-urls"),
            init: PathBuf::from("/root/.local/bin/olares-init"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSettings {
    /// Mounted service account namespace file
    pub namespace_file: PathBuf,
    /// Namespace used when the file is absent or empty
    pub default_namespace: String,
    /// Base domain appended to the user segment of the namespace
    pub domain_suffix: String,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            namespace_file: PathBuf::from(
                "/var/run/secrets/kubernetes.io/serviceaccount/namespace",
            ),
            default_namespace: "default".to_string(),
            domain_suffix: "olares.com".to_string(),
        }
    }
}

impl Settings {
    /// Validate settings after parsing
    pub fn validate(&self) -> anyhow::Result<()> {
        let tools = [
            ("kubectl", &self.tools.kubectl),
            ("deploy", &self.tools.deploy),
            ("manage", &self.tools.manage),
            ("urls", &self.tools.urls),
            ("init", &self.tools.init),
        ];
        for (name, path) in tools {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Tool path 'tools.{}' must not be empty", name);
            }
        }
        if self.environment.domain_suffix.trim().is_empty() {
            anyhow::bail!("'environment.domain_suffix' must not be empty");
        }
        if self.environment.default_namespace.trim().is_empty() {
            anyhow::bail!("'environment.default_namespace' must not be empty");
        }
        Ok(())
    }
}
