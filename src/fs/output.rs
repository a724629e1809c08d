use crate::error::StemplateError;
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::fs::{self, File, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// How a non-template file ended up at its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    HardLink,
    Copy,
}

/// Create the directory at `dest` (and any missing parent) with the given permissions.
///
/// An existing directory is reused. An existing file at `dest` is an error.
pub fn create_dir_mirror(dest: &Path, permissions: Permissions) -> Result<(), StemplateError> {
    if dest.exists() && !dest.is_dir() {
        return Err(Report::new(StemplateError::filesystem(dest))
            .attach_printable("a file is in the way of the directory"));
    }
    fs::create_dir_all(dest)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(dest))
        .attach_printable("cannot create directory")?;
    fs::set_permissions(dest, permissions)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(dest))
        .attach_printable("cannot set directory permissions")
}

/// Make sure the parent directory of `dest` exists
pub fn ensure_parent(dest: &Path) -> Result<(), StemplateError> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if parent.is_dir() {
        return Ok(());
    }
    log::debug!("creating parent directory: {}", parent.display());
    fs::create_dir_all(parent)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(parent))
        .attach_printable("cannot create parent directory")
}

/// Hard link `src` to `dest`, or copy it when linking is not possible.
///
/// Copying keeps the permission bits of the source. An existing file at `dest` is replaced.
pub fn link_or_copy(src: &Path, dest: &Path) -> Result<Materialized, StemplateError> {
    if fs::symlink_metadata(dest).is_ok() {
        log::debug!("replacing existing file: {}", dest.display());
        fs::remove_file(dest)
            .into_report()
            .change_context_lazy(|| StemplateError::filesystem(dest))
            .attach_printable("cannot replace existing file")?;
    }
    match fs::hard_link(src, dest) {
        Ok(_) => Ok(Materialized::HardLink),
        Err(e) => {
            log::debug!(
                "cannot hard link {} to {}, copying instead: {e}",
                src.display(),
                dest.display()
            );
            fs::copy(src, dest)
                .into_report()
                .change_context_lazy(|| StemplateError::filesystem(dest))
                .attach_printable_lazy(|| format!("cannot copy from `{}`", src.display()))?;
            Ok(Materialized::Copy)
        }
    }
}

/// Create the destination file of a rendered template.
///
/// An existing file is unlinked, not truncated: it may be a hard link to a source file.
pub fn create_output_file(dest: &Path) -> Result<BufWriter<File>, StemplateError> {
    if dest.is_file() {
        fs::remove_file(dest)
            .into_report()
            .change_context_lazy(|| StemplateError::filesystem(dest))
            .attach_printable("cannot replace existing file")?;
    }
    File::create(dest)
        .map(BufWriter::new)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(dest))
        .attach_printable("cannot create output file")
}

/// Print the raw bytes of `src` to the console
pub fn print_raw(src: &Path, console: &mut dyn Write) -> Result<(), StemplateError> {
    let mut file = File::open(src)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(src))
        .attach_printable("cannot open file")?;
    io::copy(&mut file, console)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(src))
        .attach_printable("cannot print file")?;
    Ok(())
}
