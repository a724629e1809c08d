//! Helpers around Path objects provided by the standard library
//!
//! In the program, we use several kinds of paths
//! - The template input as typed by the user, which may be relative or a comma separated list
//! - The paths yielded by walking a template root
//! - The destination paths under the output directory
//!
//! The helpers here decide whether a path is a template and map source paths
//! to keys that are safe to join under an output directory.

use std::path::{Component, Path, PathBuf};

/// The default marker for template files
pub const DEFAULT_TEMPLATE_EXT: &str = ".template";

/// Normalize a template marker so it always starts with a `.`
pub fn normalize_marker(marker: &str) -> String {
    if marker.starts_with('.') {
        marker.to_string()
    } else {
        format!(".{marker}")
    }
}

pub trait TemplatePath {
    /// Check if the file name ends with the template marker.
    ///
    /// A file named exactly like the marker (e.g. `.template`) is not a template.
    fn is_template_file(&self, marker: &str) -> bool;
    /// Remove the template marker from the file name.
    ///
    /// Returns the path unchanged if it is not a template file.
    fn strip_template_ext(&self, marker: &str) -> PathBuf;
    /// Turn the path into a relative key that stays inside the directory it is joined to.
    ///
    /// Root, prefix, `.` and `..` components are dropped.
    fn to_relative_key(&self) -> PathBuf;
}

impl TemplatePath for Path {
    fn is_template_file(&self, marker: &str) -> bool {
        if marker.is_empty() {
            return false;
        }
        match self.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.len() > marker.len() && name.ends_with(marker),
            None => false,
        }
    }

    fn strip_template_ext(&self, marker: &str) -> PathBuf {
        if !self.is_template_file(marker) {
            return self.to_path_buf();
        }
        // is_template_file guarantees a valid utf-8 file name
        match self.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.with_file_name(&name[..name.len() - marker.len()]),
            None => self.to_path_buf(),
        }
    }

    fn to_relative_key(&self) -> PathBuf {
        self.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .collect()
    }
}

impl TemplatePath for PathBuf {
    #[inline]
    fn is_template_file(&self, marker: &str) -> bool {
        self.as_path().is_template_file(marker)
    }
    #[inline]
    fn strip_template_ext(&self, marker: &str) -> PathBuf {
        self.as_path().strip_template_ext(marker)
    }
    #[inline]
    fn to_relative_key(&self) -> PathBuf {
        self.as_path().to_relative_key()
    }
}

#[cfg(test)]
mod ut {
    use super::*;

    #[test]
    fn test_normalize_marker() {
        assert_eq!(".template", normalize_marker("template"));
        assert_eq!(".tpl", normalize_marker(".tpl"));
    }

    #[test]
    fn test_is_template_file() {
        assert!(Path::new("a/b.conf.template").is_template_file(".template"));
        assert!(Path::new("b.template").is_template_file(".template"));
        assert!(!Path::new("b.conf").is_template_file(".template"));
        assert!(!Path::new("a.template/b.conf").is_template_file(".template"));
        assert!(!Path::new(".template").is_template_file(".template"));
        assert!(!Path::new("b.template").is_template_file(""));
    }

    #[test]
    fn test_strip_template_ext() {
        assert_eq!(
            PathBuf::from("out/a/b.conf"),
            Path::new("out/a/b.conf.template").strip_template_ext(".template")
        );
        assert_eq!(
            PathBuf::from("out/a/b.conf"),
            Path::new("out/a/b.conf").strip_template_ext(".template")
        );
        assert_eq!(
            PathBuf::from("run.sh"),
            Path::new("run.sh.tpl").strip_template_ext(".tpl")
        );
    }

    #[test]
    fn test_to_relative_key() {
        assert_eq!(PathBuf::from("a/b"), Path::new("./a/b").to_relative_key());
        assert_eq!(PathBuf::from("a/b"), Path::new("../a/./b").to_relative_key());
        #[cfg(not(windows))]
        assert_eq!(PathBuf::from("tmp/x"), Path::new("/tmp/x").to_relative_key());
    }
}
