use super::classify::{InputKind, OutputTarget, Plan, Root};
use super::walk::Visit;
use crate::fs::TemplatePath;
use std::path::{Path, PathBuf};

/// What to do with a visited entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do
    Skip,
    /// Create the directory
    CreateDir(PathBuf),
    /// Hard link or copy the file verbatim
    Copy(PathBuf),
    /// Render the file as a template into the destination
    Render(PathBuf),
    /// Print the raw file content to the console
    Print,
    /// Render the file as a template to the console
    RenderToConsole,
}

/// Decides the fate of every visited entry
#[derive(Debug)]
pub struct Resolver<'a> {
    plan: &'a Plan,
    marker: String,
    all: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(plan: &'a Plan, marker: String, all: bool) -> Self {
        Self { plan, marker, all }
    }

    /// If a file at `path` should be rendered in a tree input
    fn is_selected(&self, path: &Path) -> bool {
        self.all || path.is_template_file(&self.marker)
    }

    pub fn resolve(&self, root: &Root, visit: &Visit) -> Action {
        let output = match &self.plan.output {
            OutputTarget::Console => return self.resolve_console(visit),
            OutputTarget::ExistingDir(p) | OutputTarget::ExistingFile(p) | OutputTarget::Missing(p) => p,
        };

        let dest = match self.plan.input {
            InputKind::File => {
                if visit.is_dir {
                    return Action::Skip;
                }
                return Action::Render(self.single_file_destination(output, visit));
            }
            InputKind::Dir => {
                // the root's contents are hoisted into the output
                if visit.depth == 0 {
                    return Action::Skip;
                }
                output.join(&visit.rel)
            }
            InputKind::Multi => output.join(root.given.join(&visit.rel).to_relative_key()),
        };

        if visit.is_dir {
            Action::CreateDir(dest)
        } else if self.is_selected(&dest) {
            Action::Render(dest.strip_template_ext(&self.marker))
        } else {
            Action::Copy(dest)
        }
    }

    fn resolve_console(&self, visit: &Visit) -> Action {
        if visit.is_dir {
            Action::Skip
        } else if self.plan.input == InputKind::File || self.is_selected(&visit.path) {
            Action::RenderToConsole
        } else {
            Action::Print
        }
    }

    /// An explicit output file is used as is. Into a directory, the file keeps its name minus the marker.
    fn single_file_destination(&self, output: &Path, visit: &Visit) -> PathBuf {
        match &self.plan.output {
            OutputTarget::ExistingDir(_) => match visit.path.file_name() {
                Some(name) => output.join(name).strip_template_ext(&self.marker),
                None => output.to_path_buf(),
            },
            _ => output.to_path_buf(),
        }
    }
}
