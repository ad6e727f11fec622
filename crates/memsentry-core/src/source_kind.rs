//! Eligible C source kinds.

use std::path::Path;

/// Kinds of files accepted for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A `.c` translation unit.
    CSource,
    /// A `.h` header.
    CHeader,
}

impl SourceKind {
    /// File name suffixes that make a file eligible, in match order.
    ///
    /// Matching is exact and case-sensitive: `main.C` is not eligible.
    pub const SUFFIXES: &'static [(&'static str, SourceKind)] =
        &[(".c", SourceKind::CSource), (".h", SourceKind::CHeader)];

    /// Classify a path by the suffix of its final component.
    ///
    /// The name is compared as raw bytes, so non-UTF-8 names still match.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.as_encoded_bytes();
        Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix.as_bytes()))
            .map(|(_, kind)| *kind)
    }

    /// Whether the path names an eligible file.
    #[must_use]
    pub fn is_eligible(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("main.c")), Some(SourceKind::CSource));
        assert_eq!(SourceKind::from_path(Path::new("list.h")), Some(SourceKind::CHeader));
        assert_eq!(SourceKind::from_path(Path::new("readme.md")), None);
        assert_eq!(SourceKind::from_path(Path::new("main.cc")), None);
        assert_eq!(SourceKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert!(!SourceKind::is_eligible(Path::new("MAIN.C")));
        assert!(!SourceKind::is_eligible(Path::new("types.H")));
    }

    #[test]
    fn test_from_path_uses_final_component() {
        let path = PathBuf::from("src.c/notes.txt");
        assert!(!SourceKind::is_eligible(&path));

        let path = PathBuf::from("project/include/api.h");
        assert_eq!(SourceKind::from_path(&path), Some(SourceKind::CHeader));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_eligible() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.c");
        assert_eq!(SourceKind::from_path(Path::new(name)), Some(SourceKind::CSource));
        assert!(!SourceKind::is_eligible(Path::new(OsStr::from_bytes(b"caf\xe9.txt"))));
    }
}
