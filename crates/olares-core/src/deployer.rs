//! Deployer facade over the platform's external tools.
//!
//! Each operation issues one blocking invocation of an external tool (plus
//! the annotation query after a deploy or info call) and reports the
//! outcome. A non-zero exit is part of the result, never an `Err`; only a
//! tool that cannot be started at all aborts the operation.

use std::path::Path;

use crate::config::{Settings, ToolPaths};
use crate::detect::FrameworkProfile;
use crate::environment::Environment;
use crate::error::DeployerResult;
use crate::naming::sanitize_app_name;
use crate::process::{CommandOutput, CommandRunner, SystemRunner};
use crate::resolver::resolve;
use crate::types::{AppInfo, DeploymentRequest, DeploymentResult, ManageReport};
use crate::urls::{
    THIRD_LEVEL_DOMAIN_JSONPATH, ThirdLevelDomain, derive_urls, external_url, internal_url,
    third_level_domain_from_output,
};

/// Error reported by `info` when the manage tool fails.
const APP_NOT_FOUND: &str = "App not found";

/// Deploys and manages applications through the platform tools.
#[derive(Debug)]
pub struct Deployer<R: CommandRunner = SystemRunner> {
    tools: ToolPaths,
    env: Environment,
    runner: R,
}

impl Deployer<SystemRunner> {
    /// Discover the environment and prepare a deployer that runs real
    /// processes.
    pub fn with_defaults(settings: &Settings) -> DeployerResult<Self> {
        Self::bootstrap(settings, SystemRunner::new())
    }
}

impl<R: CommandRunner> Deployer<R> {
    /// Create a deployer from already discovered parts. Does not run the
    /// init tool.
    pub fn new(tools: ToolPaths, env: Environment, runner: R) -> Self {
        Self { tools, env, runner }
    }

    /// Discover the environment and run the init tool if it is installed.
    pub fn bootstrap(settings: &Settings, runner: R) -> DeployerResult<Self> {
        let env = Environment::discover(&settings.environment)?;
        tracing::debug!(namespace = %env.namespace, domain = %env.domain, "Environment discovered");

        let deployer = Self::new(settings.tools.clone(), env, runner);
        deployer.ensure_environment()?;
        Ok(deployer)
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn ensure_environment(&self) -> DeployerResult<()> {
        if !self.tools.init.exists() {
            return Ok(());
        }
        let output = self.runner.run(&self.tools.init, &[])?;
        if !output.success() {
            tracing::warn!(
                code = ?output.code,
                stderr = %output.stderr.trim(),
                "Environment init script failed, continuing"
            );
        }
        Ok(())
    }

    /// Deploy an application.
    pub fn deploy(&self, request: &DeploymentRequest) -> DeployerResult<DeploymentResult> {
        let resolved = resolve(request);
        tracing::info!(
            app = %resolved.app_name,
            image = %resolved.image,
            port = resolved.port,
            "Deploying application"
        );

        let output = self.runner.run(&self.tools.deploy, &resolved.deploy_args())?;

        if !output.success() {
            tracing::warn!(app = %resolved.app_name, code = ?output.code, "Deploy tool failed");
            return Ok(DeploymentResult::failed(
                &resolved.app_name,
                &self.env.namespace,
                resolved.port,
                internal_url(&resolved.app_name, &self.env.namespace, resolved.port),
                output.stderr,
            ));
        }

        let tld = self.third_level_domain(&resolved.app_name);
        let urls = derive_urls(&resolved.app_name, &self.env, resolved.port, tld);

        Ok(DeploymentResult::deployed(
            resolved.app_name,
            &self.env.namespace,
            resolved.port,
            urls,
        ))
    }

    /// Deploy a project directory, inferring image, port and command from
    /// its files. Unrecognised projects fall back to the generic Python
    /// profile.
    pub fn auto_deploy(
        &self,
        app_name: &str,
        project_path: &Path,
    ) -> DeployerResult<DeploymentResult> {
        let fallback = FrameworkProfile::unknown();
        let request = DeploymentRequest::new(app_name, fallback.image, fallback.port)
            .with_auto_detect(project_path);
        self.deploy(&request)
    }

    /// Look up the platform assigned subdomain of a deployment.
    ///
    /// Every failure (tool missing, non-zero exit, empty or malformed
    /// annotation) means "not assigned yet" and yields `None`.
    pub fn third_level_domain(&self, app_name: &str) -> Option<ThirdLevelDomain> {
        let args = [
            "get".to_string(),
            "deployment".to_string(),
            app_name.to_string(),
            "-n".to_string(),
            self.env.namespace.clone(),
            "-o".to_string(),
            THIRD_LEVEL_DOMAIN_JSONPATH.to_string(),
        ];

        match self.runner.run(&self.tools.kubectl, &args) {
            Ok(output) => third_level_domain_from_output(&output),
            Err(err) => {
                tracing::warn!(app = %app_name, error = %err, "Third-level domain lookup failed");
                None
            }
        }
    }

    /// Show details of a deployed application.
    pub fn app_info(&self, app_name: &str) -> DeployerResult<AppInfo> {
        let app_name = sanitize_app_name(app_name);
        let output = self.manage(&["info", &app_name])?;

        if !output.success() {
            return Ok(AppInfo {
                success: false,
                app_name,
                external_url: None,
                output: output.stdout,
                error: Some(APP_NOT_FOUND.to_string()),
            });
        }

        let external_url = self
            .third_level_domain(&app_name)
            .and_then(|tld| external_url(&tld, &self.env.domain));

        Ok(AppInfo {
            success: true,
            app_name,
            external_url,
            output: output.stdout,
            error: None,
        })
    }

    /// List all deployed applications.
    pub fn list_apps(&self) -> DeployerResult<ManageReport> {
        let output = self.manage(&["list"])?;
        Ok(report(None, output))
    }

    /// Fetch application logs. With `follow`, the logs are streamed to the
    /// terminal until the tool exits and only the exit status is reported.
    pub fn logs(&self, app_name: &str, follow: bool) -> DeployerResult<ManageReport> {
        let app_name = sanitize_app_name(app_name);

        if follow {
            let args = ["logs".to_string(), app_name.clone(), "-f".to_string()];
            let code = self.runner.stream(&self.tools.manage, &args)?;
            let success = code == Some(0);
            return Ok(ManageReport {
                success,
                app_name: Some(app_name),
                output: String::new(),
                error: (!success).then(|| format!("log stream exited with {:?}", code)),
            });
        }

        let output = self.manage(&["logs", &app_name])?;
        Ok(report(Some(app_name), output))
    }

    /// Delete an application.
    pub fn delete(&self, app_name: &str) -> DeployerResult<ManageReport> {
        let app_name = sanitize_app_name(app_name);
        tracing::info!(app = %app_name, "Deleting application");
        let output = self.manage(&["delete", &app_name])?;
        Ok(report(Some(app_name), output))
    }

    /// Table of all deployed applications and their URLs.
    pub fn all_urls(&self) -> DeployerResult<ManageReport> {
        let output = self.runner.run(&self.tools.urls, &[])?;
        Ok(report(None, output))
    }

    fn manage(&self, args: &[&str]) -> DeployerResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(&self.tools.manage, &args)
    }
}

fn report(app_name: Option<String>, output: CommandOutput) -> ManageReport {
    let success = output.success();
    ManageReport {
        success,
        app_name,
        output: output.stdout,
        error: (!success).then_some(output.stderr),
    }
}
