//! Files embedded at compile time.

use include_dir::{include_dir, Dir};

use crate::error::{Result, TexprojectError};

/// Embedded resources directory.
static RESOURCES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/resources");

fn embedded(path: &str) -> Result<&'static str> {
    let file = RESOURCES
        .get_file(path)
        .ok_or_else(|| TexprojectError::ConfigNotFound {
            path: format!("resources/{}", path).into(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| TexprojectError::ConfigParseError {
            path: format!("resources/{}", path).into(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// The built-in configuration layer.
pub fn default_config() -> Result<&'static str> {
    embedded("config.yml")
}

/// A built-in support template, by file name.
pub fn support_file(name: &str) -> Result<&'static str> {
    embedded(&format!("support/{}", name))
}
