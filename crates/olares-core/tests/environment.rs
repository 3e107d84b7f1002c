use olares_core::config::EnvironmentSettings;
use olares_core::environment::Environment;
use tempfile::TempDir;

fn settings_with_file(path: std::path::PathBuf) -> EnvironmentSettings {
    EnvironmentSettings {
        namespace_file: path,
        ..EnvironmentSettings::default()
    }
}

#[test]
fn namespace_is_trimmed_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("namespace");
    std::fs::write(&path, "  user-space-alice\n").unwrap();

    let env = Environment::discover(&settings_with_file(path)).unwrap();

    assert_eq!(env.namespace, "user-space-alice");
    assert_eq!(env.domain, "alice.olares.com");
}

#[test]
fn missing_file_uses_default_namespace() {
    let temp = TempDir::new().unwrap();
    let env = Environment::discover(&settings_with_file(temp.path().join("nope"))).unwrap();

    assert_eq!(env.namespace, "default");
    assert_eq!(env.domain, "unknown.olares.com");
}

#[test]
fn empty_file_uses_default_namespace() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("namespace");
    std::fs::write(&path, "\n").unwrap();

    let env = Environment::discover(&settings_with_file(path)).unwrap();
    assert_eq!(env.namespace, "default");
}

#[test]
fn custom_domain_suffix_is_used() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("namespace");
    std::fs::write(&path, "user-space-carol").unwrap();

    let settings = EnvironmentSettings {
        namespace_file: path,
        domain_suffix: "olares.cn".to_string(),
        ..EnvironmentSettings::default()
    };
    let env = Environment::discover(&settings).unwrap();
    assert_eq!(env.domain, "carol.olares.cn");
}

#[test]
fn directory_in_place_of_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let env = Environment::discover(&settings_with_file(temp.path().to_path_buf()));
    assert!(env.is_err());
}
