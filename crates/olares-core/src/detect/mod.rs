//! Framework detection from a project's file layout.
//!
//! Detection is a fixed, ordered list of rules. Each rule looks for one
//! marker file (and sometimes a substring inside it) and yields a
//! [`FrameworkProfile`] with the image, port and startup command to use.
//!
//! | Order | Marker         | Content check        | Framework |
//! |-------|----------------|----------------------|-----------|
//! | 1     | `app.py`       | `Flask` or `flask`   | flask     |
//! | 2     | `main.py`      | `FastAPI`/`fastapi`  | fastapi   |
//! | 3     | `manage.py`    | none                 | django    |
//! | 4     | `package.json` | `express`            | express   |
//!
//! The first rule that matches wins. New frameworks are added by writing
//! another rule function and placing it in a rule slice.

mod rules;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use rules::{detect_django, detect_express, detect_fastapi, detect_flask};

/// Base image for Python projects.
pub const PYTHON_IMAGE: &str = "python:3.11-slim";
/// Base image for Node projects.
pub const NODE_IMAGE: &str = "node:20-slim";

/// Web framework recognised in a project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Flask,
    FastApi,
    Django,
    Express,
    Unknown,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Flask => "flask",
            Framework::FastApi => "fastapi",
            Framework::Django => "django",
            Framework::Express => "express",
            Framework::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Framework::Unknown
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment defaults inferred for a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkProfile {
    pub framework: Framework,
    pub image: String,
    pub port: u16,
    pub command: Option<String>,
}

impl FrameworkProfile {
    pub fn new(
        framework: Framework,
        image: impl Into<String>,
        port: u16,
        command: Option<&str>,
    ) -> Self {
        Self {
            framework,
            image: image.into(),
            port,
            command: command.map(str::to_string),
        }
    }

    /// Profile returned when no rule matches.
    pub fn unknown() -> Self {
        Self::new(Framework::Unknown, PYTHON_IMAGE, 8000, None)
    }
}

/// A single detection rule: inspect the project directory and return a
/// profile if the rule's marker is present.
pub type DetectionRule = fn(&Path) -> Option<FrameworkProfile>;

/// Built-in rules in priority order.
pub const DEFAULT_RULES: &[DetectionRule] =
    &[detect_flask, detect_fastapi, detect_django, detect_express];

/// Detect the framework of the project at `project_path` using the
/// built-in rules.
pub fn detect_framework(project_path: &Path) -> FrameworkProfile {
    detect_with_rules(project_path, DEFAULT_RULES)
}

/// Detect using a caller supplied, ordered rule list.
///
/// Rules are evaluated in order and evaluation stops at the first match.
pub fn detect_with_rules(project_path: &Path, rules: &[DetectionRule]) -> FrameworkProfile {
    let profile = rules
        .iter()
        .find_map(|rule| rule(project_path))
        .unwrap_or_else(FrameworkProfile::unknown);

    tracing::debug!(
        path = %project_path.display(),
        framework = %profile.framework,
        "Detected framework"
    );

    profile
}
