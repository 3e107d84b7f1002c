//! Olares Deployer Core Library
//!
//! Resolves deployment requests (name sanitization, framework detection),
//! hands them to the platform's deploy and manage tools, and derives the
//! internal and external URLs of deployed applications.

pub mod config;
pub mod deployer;
pub mod detect;
pub mod environment;
pub mod error;
pub mod naming;
pub mod process;
pub mod resolver;
pub mod types;
pub mod urls;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{EnvironmentSettings, Settings, ToolPaths};
    pub use crate::environment::Environment;

    // Resolution
    pub use crate::detect::{Framework, FrameworkProfile, detect_framework};
    pub use crate::naming::sanitize_app_name;
    pub use crate::resolver::{ResolvedDeployment, resolve};
    pub use crate::types::{AppInfo, DeploymentRequest, DeploymentResult, ManageReport};

    // Execution
    pub use crate::deployer::Deployer;
    pub use crate::error::{DeployerError, DeployerResult};
    pub use crate::process::{CommandOutput, CommandRunner, SystemRunner};
}
