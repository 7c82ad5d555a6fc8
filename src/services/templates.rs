use include_dir::{Dir, include_dir};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::domain::AppError;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Vector logo document.
pub const LOGO_TEMPLATE: &str = "logo.svg.j2";
/// Run summary report.
pub const SUMMARY_TEMPLATE: &str = "summary.md.j2";

fn load_template(name: &str) -> Result<&'static str, AppError> {
    TEMPLATES_DIR.get_file(name).and_then(|file| file.contents_utf8()).ok_or_else(|| {
        AppError::Template { name: name.to_string(), details: "embedded template missing".into() }
    })
}

/// Render an embedded template. Undefined variables are errors.
pub fn render<S: Serialize>(name: &str, context: S) -> Result<String, AppError> {
    let content = load_template(name)?;
    let to_error = |err: minijinja::Error| AppError::Template {
        name: name.to_string(),
        details: err.to_string(),
    };

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, content).map_err(to_error)?;
    env.get_template(name).map_err(to_error)?.render(context).map_err(to_error)
}
