use super::classify::Root;
use crate::error::StemplateError;
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::fs::Permissions;
use std::path::PathBuf;
use walkdir::WalkDir;

/// One entry seen while walking a template root
#[derive(Debug, Clone)]
pub struct Visit {
    /// The path on disk
    pub path: PathBuf,
    /// The path relative to the walked root. Empty for the root itself
    pub rel: PathBuf,
    /// 0 for the root
    pub depth: usize,
    pub is_dir: bool,
    pub permissions: Permissions,
}

/// Walk a root depth first, directories before their children,
/// siblings in file name order.
///
/// The first error ends the walk.
pub fn walk(root: &Root) -> impl Iterator<Item = Result<Visit, StemplateError>> + '_ {
    WalkDir::new(&root.path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| root.path.clone());
                Report::new(StemplateError::filesystem(&path))
                    .attach_printable(format!("cannot walk template input: {e}"))
            })?;
            let path = entry.path().to_path_buf();
            let metadata = entry
                .metadata()
                .into_report()
                .change_context_lazy(|| StemplateError::filesystem(&path))
                .attach_printable("cannot read metadata")?;
            let rel = path
                .strip_prefix(&root.path)
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Ok(Visit {
                rel,
                depth: entry.depth(),
                is_dir: entry.file_type().is_dir(),
                permissions: metadata.permissions(),
                path,
            })
        })
}
