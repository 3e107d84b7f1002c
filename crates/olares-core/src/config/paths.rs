//! Settings file location.

use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "OLARES_DEPLOYER_CONFIG";

/// `<config_dir>/olares/deployer.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("olares").join("deployer.toml"))
}

/// Pick the settings file to load.
///
/// An explicit path (flag or environment variable) must exist; the default
/// location is optional.
pub fn resolve_config_path(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let from_env = std::env::var_os(CONFIG_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    select_config_path(explicit, from_env, default_config_path())
}

fn select_config_path(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    default: Option<PathBuf>,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
        return Ok(Some(path));
    }

    Ok(default.filter(|p| p.exists()))
}
