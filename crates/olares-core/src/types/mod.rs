//! Request and result types shared by the deployer and its frontends.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::urls::{DerivedUrls, ThirdLevelDomain};

/// What the caller wants deployed, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Raw application name, sanitized during resolution
    pub app_name: String,
    /// Container image
    pub image: String,
    /// Port the application listens on
    pub port: u16,
    /// Startup command passed to the container
    pub command: Option<String>,
    /// Infer image, port and command from `project_path`
    pub auto_detect: bool,
    /// Project directory inspected when `auto_detect` is set
    pub project_path: Option<PathBuf>,
}

impl DeploymentRequest {
    pub fn new(app_name: impl Into<String>, image: impl Into<String>, port: u16) -> Self {
        Self {
            app_name: app_name.into(),
            image: image.into(),
            port,
            command: None,
            auto_detect: false,
            project_path: None,
        }
    }

    /// Set the startup command
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Enable framework detection on the given project directory
    pub fn with_auto_detect(mut self, project_path: impl Into<PathBuf>) -> Self {
        self.auto_detect = true;
        self.project_path = Some(project_path.into());
        self
    }
}

/// Outcome of a deploy invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub success: bool,
    pub app_name: String,
    pub namespace: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub internal_url: String,
    pub third_level_domain: Option<ThirdLevelDomain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeploymentResult {
    /// Successful deployment with whatever URLs are known.
    pub fn deployed(
        app_name: impl Into<String>,
        namespace: impl Into<String>,
        port: u16,
        urls: DerivedUrls,
    ) -> Self {
        Self {
            success: true,
            app_name: app_name.into(),
            namespace: namespace.into(),
            port,
            external_url: urls.external_url,
            internal_url: urls.internal_url,
            third_level_domain: urls.third_level_domain,
            error: None,
        }
    }

    /// Deploy tool exited non-zero. The internal URL is still reported
    /// since it only depends on naming.
    pub fn failed(
        app_name: impl Into<String>,
        namespace: impl Into<String>,
        port: u16,
        internal_url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            app_name: app_name.into(),
            namespace: namespace.into(),
            port,
            external_url: None,
            internal_url: internal_url.into(),
            third_level_domain: None,
            error: Some(error.into()),
        }
    }
}

/// Information about a deployed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub success: bool,
    pub app_name: String,
    pub external_url: Option<String>,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a pass-through management call (list, logs, delete, urls).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    pub output: String,
    pub error: Option<String>,
}
