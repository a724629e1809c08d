use crate::error::StemplateError;
use crate::fs::{normalize_marker, DEFAULT_TEMPLATE_EXT};
use derivative::Derivative;
use error_stack::{Report, Result};
use std::path::PathBuf;

/// Config for running stemplate
///
/// Use this to configure stemplate when calling it from the library
/// # Example
/// ```no_run
/// use stemplate::{Config, Dictionary, Stemplate, Verbosity};
///
/// let mut dictionary = Dictionary::new();
/// dictionary.insert("user".to_string(), "guest".into());
///
/// // Use the default config
/// let mut cfg = Config::default();
/// cfg.input = "templates".to_string();
/// cfg.output = Some("out".into());
/// // Change verbosity to verbose
/// cfg.verbosity = Verbosity::Verbose;
/// Stemplate::run(cfg, &dictionary).unwrap();
/// ```
#[derive(Derivative, Clone)]
#[derivative(Debug, Default)]
pub struct Config {
    /// Base directory for resolving the input and output paths. This is usually the current directory.
    #[derivative(Default(value = "PathBuf::from(\".\")"))]
    pub base_dir: PathBuf,
    /// The template input: a file, a directory, or a comma separated list of both
    pub input: String,
    /// The output path. `None` prints to the console
    pub output: Option<PathBuf>,
    /// Marker at the end of template file names
    #[derivative(Default(value = "DEFAULT_TEMPLATE_EXT.to_string()"))]
    pub extension: String,
    /// Treat every file as a template, regardless of the marker
    pub all: bool,
    /// The verbosity. See [`Verbosity`]
    pub verbosity: Verbosity,
}

impl Config {
    /// The template marker, always starting with `.`
    pub fn marker(&self) -> String {
        normalize_marker(&self.extension)
    }

    /// Check that every comma separated item of the input exists
    pub fn validate(&self) -> Result<(), StemplateError> {
        if self.input.is_empty() {
            return Err(Report::new(StemplateError::Validation)
                .attach_printable("the template input is empty"));
        }
        if self.base_dir.join(&self.input).exists() {
            return Ok(());
        }
        for item in self.input.split(',') {
            let path = self.base_dir.join(item);
            if item.is_empty() || !path.exists() {
                return Err(Report::new(StemplateError::Validation).attach_printable(format!(
                    "template input `{}` does not exist",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// The output path resolved against the base directory
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|o| self.base_dir.join(o))
    }
}

/// The verbosity config options
#[derive(Derivative, PartialEq, Clone)]
#[derivative(Debug, Default)]
pub enum Verbosity {
    /// Print nothing besides errors
    #[derivative(Default)]
    Quiet,
    /// Print a summary when done
    Normal,
    /// Print every entry as it is processed
    Verbose,
}
