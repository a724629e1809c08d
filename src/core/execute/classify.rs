use crate::error::StemplateError;
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// What the template input is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A single file
    File,
    /// A single directory whose contents are mirrored
    Dir,
    /// A comma separated list of files and directories
    Multi,
}

/// What the output path is, at the time of classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// No output, print to the console
    Console,
    ExistingFile(PathBuf),
    ExistingDir(PathBuf),
    /// Does not exist yet
    Missing(PathBuf),
}

impl OutputTarget {
    pub fn classify(output: Option<PathBuf>) -> Self {
        match output {
            None => Self::Console,
            Some(p) if p.is_dir() => Self::ExistingDir(p),
            Some(p) if p.exists() => Self::ExistingFile(p),
            Some(p) => Self::Missing(p),
        }
    }
}

/// One root of the template input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    /// The root as typed by the user
    pub given: PathBuf,
    /// The root resolved against the base directory
    pub path: PathBuf,
}

/// The materialization plan of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub input: InputKind,
    pub output: OutputTarget,
    pub roots: Vec<Root>,
}

impl Plan {
    /// Classify the input and the output.
    ///
    /// An input that does not exist as a literal path is a comma separated list.
    pub fn classify(base_dir: &Path, input: &str, output: Option<PathBuf>) -> Self {
        let literal = base_dir.join(input);
        let (kind, given) = match fs::metadata(&literal) {
            Ok(meta) if meta.is_dir() => (InputKind::Dir, vec![input]),
            Ok(_) => (InputKind::File, vec![input]),
            Err(_) => (InputKind::Multi, input.split(',').collect()),
        };
        let roots = given
            .into_iter()
            .map(|g| Root {
                given: PathBuf::from(g),
                path: base_dir.join(g),
            })
            .collect();
        let plan = Self {
            input: kind,
            output: OutputTarget::classify(output),
            roots,
        };
        log::debug!("classified: {plan:?}");
        plan
    }

    /// If the input can produce more than one file
    pub fn is_tree(&self) -> bool {
        self.input != InputKind::File
    }

    /// Prepare the output before walking.
    ///
    /// Tree inputs need an output directory, which is created if missing.
    /// Returns the plan with the output updated to the directory.
    pub fn prepare_output(mut self) -> Result<Self, StemplateError> {
        if !self.is_tree() {
            return Ok(self);
        }
        self.output = match self.output {
            OutputTarget::ExistingFile(p) => {
                return Err(Report::new(StemplateError::conflict(&p))
                    .attach_printable("the template input is a directory or a list, the output must be a directory"));
            }
            OutputTarget::Missing(p) => {
                log::info!("creating output directory: {}", p.display());
                fs::create_dir_all(&p)
                    .into_report()
                    .change_context_lazy(|| StemplateError::filesystem(&p))
                    .attach_printable("cannot create output directory")?;
                OutputTarget::ExistingDir(p)
            }
            other => other,
        };
        Ok(self)
    }
}

#[cfg(test)]
mod ut {
    use super::*;

    #[test]
    fn test_console_when_no_output() {
        assert_eq!(OutputTarget::Console, OutputTarget::classify(None));
    }

    #[test]
    fn test_missing_input_is_multi() {
        let plan = Plan::classify(Path::new("."), "nope_a,nope_b", None);
        assert_eq!(InputKind::Multi, plan.input);
        assert_eq!(2, plan.roots.len());
        assert_eq!(PathBuf::from("nope_a"), plan.roots[0].given);
        assert_eq!(PathBuf::from("./nope_b"), plan.roots[1].path);
        assert!(plan.is_tree());
    }

    #[test]
    fn test_existing_dir_and_file() {
        let plan = Plan::classify(Path::new("."), "src", None);
        assert_eq!(InputKind::Dir, plan.input);
        assert_eq!(1, plan.roots.len());
        let plan = Plan::classify(Path::new("."), "Cargo.toml", Some(PathBuf::from("src")));
        assert_eq!(InputKind::File, plan.input);
        assert_eq!(OutputTarget::ExistingDir(PathBuf::from("src")), plan.output);
        assert!(!plan.is_tree());
    }

    #[test]
    fn test_tree_into_file_conflicts() {
        let plan = Plan::classify(Path::new("."), "src", Some(PathBuf::from("Cargo.toml")));
        assert_eq!(
            OutputTarget::ExistingFile(PathBuf::from("Cargo.toml")),
            plan.output
        );
        let err = plan.prepare_output().unwrap_err();
        assert_eq!(
            &StemplateError::Conflict("Cargo.toml".to_string()),
            err.current_context()
        );
    }

    #[test]
    fn test_file_into_missing_is_kept() {
        let plan = Plan::classify(
            Path::new("."),
            "Cargo.toml",
            Some(PathBuf::from("target/does_not_exist.txt")),
        )
        .prepare_output()
        .unwrap();
        assert_eq!(
            OutputTarget::Missing(PathBuf::from("target/does_not_exist.txt")),
            plan.output
        );
    }
}
