//! Olares Deployer CLI
//!
//! Usage:
//!   olares-deployer <APP_NAME> <IMAGE> <PORT> [COMMAND]     # Deploy an image
//!   olares-deployer --auto-deploy <APP_NAME> <PROJECT_PATH> # Detect and deploy
//!   olares-deployer info|list|logs|delete|urls|detect ...   # Manage deployments
//!
//! Three or four positionals ending in a port always mean a deploy, so an
//! application may be named after a subcommand.
//!
//! Results are printed to stdout as JSON. Logs go to stderr.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use olares_core::config::Settings;
use olares_core::deployer::Deployer;
use olares_core::detect::detect_framework;
use olares_core::types::DeploymentRequest;

const USAGE: &str = "olares-deployer <APP_NAME> <IMAGE> <PORT> [COMMAND]
       olares-deployer --auto-deploy <APP_NAME> <PROJECT_PATH>
       olares-deployer <SUBCOMMAND>";

#[derive(Parser, Debug)]
#[command(name = "olares-deployer")]
#[command(about = "Deploy applications to Olares with automatic external access", long_about = None)]
#[command(override_usage = USAGE)]
struct Cli {
    /// Settings file (default: ~/.config/olares/deployer.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Detect the framework of a project directory and deploy it
    #[arg(
        long,
        num_args = 2,
        value_names = ["APP_NAME", "PROJECT_PATH"],
        conflicts_with_all = ["app_name", "image", "port", "run_command"]
    )]
    auto_deploy: Option<Vec<String>>,

    /// Application name (sanitized before use)
    app_name: Option<String>,

    /// Container image
    image: Option<String>,

    /// Port the application listens on
    port: Option<u16>,

    /// Startup command
    #[arg(value_name = "COMMAND")]
    run_command: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// The positional deploy form on its own, without subcommands.
#[derive(Parser, Debug)]
#[command(name = "olares-deployer")]
#[command(override_usage = USAGE)]
struct DeployCli {
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    app_name: String,

    image: String,

    port: u16,

    #[arg(value_name = "COMMAND")]
    run_command: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show information about a deployed application
    Info {
        /// Application name
        app_name: String,
    },

    /// List deployed applications
    List,

    /// Show application logs
    Logs {
        /// Application name
        app_name: String,

        /// Stream logs until interrupted
        #[arg(short, long)]
        follow: bool,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Delete {
        /// Application name
        app_name: String,
    },

    /// Show all deployed applications with their external URLs
    Urls,

    /// Detect the framework of a project without deploying
    Detect {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Debug)]
enum Invocation {
    Deploy(DeployCli),
    Other(Cli),
}

impl Invocation {
    /// Try the positional deploy form first, then the full parser.
    fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if let Ok(deploy) = DeployCli::try_parse_from(args.iter().cloned()) {
            return Ok(Invocation::Deploy(deploy));
        }
        Cli::try_parse_from(args).map(Invocation::Other)
    }

    fn verbose(&self) -> u8 {
        match self {
            Invocation::Deploy(cli) => cli.verbose,
            Invocation::Other(cli) => cli.verbose,
        }
    }

    fn config(&self) -> Option<&Path> {
        match self {
            Invocation::Deploy(cli) => cli.config.as_deref(),
            Invocation::Other(cli) => cli.config.as_deref(),
        }
    }
}

/// What to do once the arguments are known to be complete.
#[derive(Debug)]
enum Action {
    Deploy(DeploymentRequest),
    AutoDeploy {
        app_name: String,
        project_path: PathBuf,
    },
    Info(String),
    List,
    Logs {
        app_name: String,
        follow: bool,
    },
    Delete(String),
    Urls,
    Detect(PathBuf),
}

fn main() -> Result<()> {
    let invocation = match Invocation::try_parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    init_tracing(invocation.verbose());
    tracing::debug!(?invocation, "Parsed arguments");

    let config = invocation.config().map(Path::to_path_buf);
    let Some(action) = plan(invocation) else {
        usage_exit();
    };

    run(action, config.as_deref())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "olares_core=info,olares_cli=info,warn",
        _ => "olares_core=debug,olares_cli=debug,info",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Turn parsed arguments into an action. `None` means required arguments
/// are missing.
fn plan(invocation: Invocation) -> Option<Action> {
    let cli = match invocation {
        Invocation::Deploy(cli) => {
            return Some(Action::Deploy(deploy_request(
                cli.app_name,
                cli.image,
                cli.port,
                cli.run_command,
            )));
        }
        Invocation::Other(cli) => cli,
    };

    if let Some(command) = cli.command {
        return Some(match command {
            Commands::Info { app_name } => Action::Info(app_name),
            Commands::List => Action::List,
            Commands::Logs { app_name, follow } => Action::Logs { app_name, follow },
            Commands::Delete { app_name } => Action::Delete(app_name),
            Commands::Urls => Action::Urls,
            Commands::Detect { path } => Action::Detect(path),
        });
    }

    if let Some(values) = cli.auto_deploy {
        let [app_name, project_path] = <[String; 2]>::try_from(values).ok()?;
        return Some(Action::AutoDeploy {
            app_name,
            project_path: PathBuf::from(project_path),
        });
    }

    let (Some(app_name), Some(image), Some(port)) = (cli.app_name, cli.image, cli.port) else {
        return None;
    };
    Some(Action::Deploy(deploy_request(
        app_name,
        image,
        port,
        cli.run_command,
    )))
}

fn deploy_request(
    app_name: String,
    image: String,
    port: u16,
    command: Option<String>,
) -> DeploymentRequest {
    let request = DeploymentRequest::new(app_name, image, port);
    match command {
        Some(command) => request.with_command(command),
        None => request,
    }
}

fn run(action: Action, config: Option<&Path>) -> Result<()> {
    if let Action::Detect(path) = &action {
        return print_json(&detect_framework(path));
    }

    let settings = Settings::load(config)?;
    let deployer = Deployer::with_defaults(&settings)?;

    match action {
        Action::Deploy(request) => print_json(&deployer.deploy(&request)?),
        Action::AutoDeploy {
            app_name,
            project_path,
        } => print_json(&deployer.auto_deploy(&app_name, &project_path)?),
        Action::Info(app_name) => print_json(&deployer.app_info(&app_name)?),
        Action::List => print_json(&deployer.list_apps()?),
        Action::Logs { app_name, follow } => print_json(&deployer.logs(&app_name, follow)?),
        Action::Delete(app_name) => print_json(&deployer.delete(&app_name)?),
        Action::Urls => print_json(&deployer.all_urls()?),
        Action::Detect(path) => print_json(&detect_framework(&path)),
    }
}

fn usage_exit() -> ! {
    eprintln!("Usage: {}", USAGE);
    eprintln!();
    eprintln!("For more information, try '--help'.");
    std::process::exit(1);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
