//! Error types

use std::error;
use std::fmt;
use std::path::Path;

/// Top level error
///
/// Every failure of a stemplate run is reported as an [`error_stack::Report`]
/// of this type. The variant says what went wrong, the attachments in the report
/// say where and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StemplateError {
    /// Bad arguments: missing dictionary source or nonexistent input/config path
    Validation,
    /// The config file cannot be parsed
    ConfigFormat(String),
    /// A map-style environment variable has a segment without `=`
    EnvFormat { variable: String, segment: String },
    /// The output path cannot hold the template input
    Conflict(String),
    /// I/O failure while walking, creating, copying or writing
    Filesystem(String),
    /// Malformed template
    TemplateSyntax(String),
    /// Template evaluation failed
    TemplateExecution(String),
}

impl StemplateError {
    pub fn config_format<P: AsRef<Path>>(p: P) -> Self {
        Self::ConfigFormat(display_path(p.as_ref()))
    }
    pub fn conflict<P: AsRef<Path>>(p: P) -> Self {
        Self::Conflict(display_path(p.as_ref()))
    }
    pub fn filesystem<P: AsRef<Path>>(p: P) -> Self {
        Self::Filesystem(display_path(p.as_ref()))
    }
}

impl fmt::Display for StemplateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "Invalid arguments."),
            Self::ConfigFormat(p) => write!(f, "Cannot parse config file `{p}`."),
            Self::EnvFormat { variable, segment } => write!(
                f,
                "Missing =. {variable} does not contain a map: {segment}"
            ),
            Self::Conflict(p) => write!(f, "Cannot copy template folder into file `{p}`."),
            Self::Filesystem(p) => write!(f, "File system error in path `{p}`."),
            Self::TemplateSyntax(p) => write!(f, "Cannot parse template `{p}`."),
            Self::TemplateExecution(p) => write!(f, "Cannot render template `{p}`."),
        }
    }
}

impl error::Error for StemplateError {}

/// Render a path for error messages
#[cfg(windows)]
fn display_path(p: &Path) -> String {
    // on windows, we try to remove the `\\?\` prefix returned
    // by `std::path::Path::display` to make the error message
    // more readable
    let path = p.display().to_string();
    match path.strip_prefix(r"\\?\") {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

#[cfg(not(windows))]
fn display_path(p: &Path) -> String {
    p.display().to_string()
}
