//! Turns a [`DeploymentRequest`] into the concrete arguments for the
//! deploy tool.

use serde::{Deserialize, Serialize};

use crate::detect::{DEFAULT_RULES, DetectionRule, Framework, detect_with_rules};
use crate::naming::sanitize_app_name;
use crate::types::DeploymentRequest;

/// Final deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeployment {
    /// Sanitized application name
    pub app_name: String,
    pub image: String,
    pub port: u16,
    pub command: Option<String>,
    /// Detected framework, `None` when detection did not run
    pub framework: Option<Framework>,
}

impl ResolvedDeployment {
    /// Positional arguments for the deploy tool:
    /// `<app_name> <image> <port> [<command>]`
    pub fn deploy_args(&self) -> Vec<String> {
        let mut args = vec![
            self.app_name.clone(),
            self.image.clone(),
            self.port.to_string(),
        ];
        if let Some(command) = self.command.as_ref().filter(|c| !c.is_empty()) {
            args.push(command.clone());
        }
        args
    }
}

/// Resolve a request with the built-in detection rules.
pub fn resolve(request: &DeploymentRequest) -> ResolvedDeployment {
    resolve_with_rules(request, DEFAULT_RULES)
}

/// Resolve a request with a custom detection rule list.
///
/// When auto-detection is requested and a framework is recognised, the
/// framework's image and port replace the caller's, and its command is
/// used only if the caller gave none.
pub fn resolve_with_rules(
    request: &DeploymentRequest,
    rules: &[DetectionRule],
) -> ResolvedDeployment {
    let mut image = request.image.clone();
    let mut port = request.port;
    let mut command = request.command.clone();
    let mut framework = None;

    if let Some(project_path) = request.project_path.as_ref().filter(|_| request.auto_detect) {
        let profile = detect_with_rules(project_path, rules);
        if profile.framework.is_known() {
            image = profile.image;
            port = profile.port;
            command = command.filter(|c| !c.is_empty()).or(profile.command);
        }
        framework = Some(profile.framework);
    }

    ResolvedDeployment {
        app_name: sanitize_app_name(&request.app_name),
        image,
        port,
        command,
        framework,
    }
}
