//! TOML parser with helpful error messages

use super::schema::Settings;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse deployer.toml with detailed error messages
pub fn parse_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    parse_settings_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// Parse deployer.toml content from string
pub fn parse_settings_str(content: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    settings.validate()?;

    Ok(settings)
}

/// Attach the offending lines to a TOML parse error
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let error_msg = error.message().to_string();

    match error.span() {
        Some(span) => {
            let line_num = content[..span.start.min(content.len())].matches('\n').count() + 1;
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                get_line_context(content, line_num),
                error_msg
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", error_msg),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 2).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_empty_settings_uses_defaults() {
        let settings = parse_settings_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_partial_tools_table() {
        let toml = r#"
[tools]
kubectl = "/usr/local/bin/kubectl"
"#;
        let settings = parse_settings_str(toml).unwrap();
        assert_eq!(settings.tools.kubectl, PathBuf::from("/usr/local/bin/kubectl"));
        assert_eq!(
            settings.tools.deploy,
            PathBuf::from("/root/.local/bin/olares-deploy")
        );
    }

    #[test]
    fn test_parse_environment_table() {
        let toml = r#"
[environment]
namespace_file = "/tmp/ns"
domain_suffix = "olares.cn"
"#;
        let settings = parse_settings_str(toml).unwrap();
        assert_eq!(settings.environment.namespace_file, PathBuf::from("/tmp/ns"));
        assert_eq!(settings.environment.domain_suffix, "olares.cn");
        assert_eq!(settings.environment.default_namespace, "default");
    }

    #[test]
    fn test_parse_invalid_toml_reports_line() {
        let toml = "[tools]\nkubectl = \"/bin/kubectl\"\ndeploy = \n";
        let err = parse_settings_str(toml).unwrap_err().to_string();
        assert!(err.contains("TOML parsing error"));
    }

    #[test]
    fn test_empty_domain_suffix_rejected() {
        let toml = r#"
[environment]
domain_suffix = ""
"#;
        let err = parse_settings_str(toml).unwrap_err().to_string();
        assert!(err.contains("domain_suffix"));
    }

    #[test]
    fn test_empty_tool_path_rejected() {
        let toml = r#"
[tools]
manage = ""
"#;
        let err = parse_settings_str(toml).unwrap_err().to_string();
        assert!(err.contains("tools.manage"));
    }
}
