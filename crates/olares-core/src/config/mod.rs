//! Deployer settings.
//!
//! Tool locations and environment conventions default to the paths used
//! on an Olares DevBox. Any of them can be overridden from a
//! `deployer.toml` file:
//!
//! ```toml
//! [tools]
//! kubectl = "/usr/local/bin/kubectl"
//! deploy = "/opt/olares/bin/olares-deploy"
//!
//! [environment]
//! domain_suffix = "olares.cn"
//! ```

pub mod parser;
pub mod paths;
pub mod schema;

pub use parser::{parse_settings, parse_settings_str};
pub use paths::{CONFIG_ENV_VAR, default_config_path, resolve_config_path};
pub use schema::{EnvironmentSettings, Settings, ToolPaths};

use std::path::Path;

impl Settings {
    /// Load settings from an explicit path, the environment variable, or
    /// the default location, falling back to built-in defaults when no
    /// file is found.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match resolve_config_path(explicit)? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading settings");
                parse_settings(&path)
            }
            None => Ok(Settings::default()),
        }
    }
}
