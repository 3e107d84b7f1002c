use std::path::PathBuf;

use olares_core::config::{Settings, parse_settings};
use tempfile::TempDir;

#[test]
fn load_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deployer.toml");
    std::fs::write(
        &path,
        r#"
[tools]
kubectl = "/usr/local/bin/kubectl"
manage = "/opt/olares/olares-manage"

[environment]
default_namespace = "sandbox"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();

    assert_eq!(settings.tools.kubectl, PathBuf::from("/usr/local/bin/kubectl"));
    assert_eq!(settings.tools.manage, PathBuf::from("/opt/olares/olares-manage"));
    assert_eq!(settings.environment.default_namespace, "sandbox");
    assert_eq!(settings.environment.domain_suffix, "olares.com");
}

#[test]
fn load_missing_explicit_file_fails() {
    let temp = TempDir::new().unwrap();
    assert!(Settings::load(Some(temp.path().join("missing.toml").as_path())).is_err());
}

#[test]
fn parse_error_mentions_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deployer.toml");
    std::fs::write(&path, "[tools\nkubectl = 1\n").unwrap();

    let err = format!("{:#}", parse_settings(&path).unwrap_err());
    assert!(err.contains("deployer.toml"));
}

#[test]
fn defaults_match_devbox_layout() {
    let settings = Settings::default();
    assert_eq!(settings.tools.kubectl, PathBuf::from("/tmp/kubectl"));
    assert_eq!(
        settings.tools.deploy,
        PathBuf::from("/root/.local/bin/olares-deploy")
    );
    assert_eq!(
        settings.environment.namespace_file,
        PathBuf::from("/var/run/secrets/kubernetes.io/serviceaccount/namespace")
    );
}
