//! Built-in detection rules, one function per framework.

use std::path::Path;

use super::{Framework, FrameworkProfile, NODE_IMAGE, PYTHON_IMAGE};

const FLASK_COMMAND: &str = "pip install flask && python app.py";
const FASTAPI_COMMAND: &str =
    "pip install fastapi uvicorn && uvicorn main:app --host 0.0.0.0 --port 8000";
const DJANGO_COMMAND: &str = "pip install django && python manage.py runserver 0.0.0.0:8000";
const EXPRESS_COMMAND: &str = "npm install && npm start";

/// `app.py` mentioning Flask.
pub fn detect_flask(project: &Path) -> Option<FrameworkProfile> {
    marker_contains(project, "app.py", &["Flask", "flask"]).then(|| {
        FrameworkProfile::new(Framework::Flask, PYTHON_IMAGE, 5000, Some(FLASK_COMMAND))
    })
}

/// `main.py` mentioning FastAPI.
pub fn detect_fastapi(project: &Path) -> Option<FrameworkProfile> {
    marker_contains(project, "main.py", &["FastAPI", "fastapi"]).then(|| {
        FrameworkProfile::new(Framework::FastApi, PYTHON_IMAGE, 8000, Some(FASTAPI_COMMAND))
    })
}

/// Any `manage.py`.
pub fn detect_django(project: &Path) -> Option<FrameworkProfile> {
    project.join("manage.py").exists().then(|| {
        FrameworkProfile::new(Framework::Django, PYTHON_IMAGE, 8000, Some(DJANGO_COMMAND))
    })
}

/// `package.json` mentioning express.
pub fn detect_express(project: &Path) -> Option<FrameworkProfile> {
    marker_contains(project, "package.json", &["express"]).then(|| {
        FrameworkProfile::new(Framework::Express, NODE_IMAGE, 3000, Some(EXPRESS_COMMAND))
    })
}

/// True if `file` exists in `project` and contains any of `needles`.
///
/// A marker that cannot be read counts as not matching.
fn marker_contains(project: &Path, file: &str, needles: &[&str]) -> bool {
    let path = project.join(file);
    if !path.exists() {
        return false;
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => needles.iter().any(|needle| content.contains(needle)),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Skipping unreadable marker file");
            false
        }
    }
}
