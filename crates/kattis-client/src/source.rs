//! Source file snapshots.
//!
//! Every file is read fully into memory once, before any network call.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{KattisError, KattisResult};

/// One source file as it was when the run started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    content: Vec<u8>,
}

impl SourceFile {
    /// Read `path` into memory.
    pub fn read(path: impl Into<PathBuf>) -> KattisResult<Self> {
        let path = path.into();
        let content = std::fs::read(&path).map_err(|e| KattisError::SourceRead {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { path, content })
    }

    /// Build from in-memory content.
    pub fn from_bytes(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content decoded as UTF-8, lossily.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Extension with its leading dot (`".cpp"`), or empty.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// File name without directories; the only name that goes on the wire.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Basename without its extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Path as the user typed it, for suffix checks and display.
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// De-duplicated source files.
///
/// Keeps first-seen argument order for inference; [`SourceSet::sorted`]
/// gives the deterministic wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    /// Read every path once. Duplicate paths are collapsed.
    pub fn read<P: AsRef<Path>>(paths: &[P]) -> KattisResult<Self> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if seen.insert(path.to_path_buf()) {
                files.push(SourceFile::read(path)?);
            }
        }
        Self::new(files)
    }

    /// Wrap already-loaded files. Later duplicates of a path are dropped.
    pub fn new(files: Vec<SourceFile>) -> KattisResult<Self> {
        let mut seen = HashSet::new();
        let files: Vec<SourceFile> = files
            .into_iter()
            .filter(|f| seen.insert(f.path.clone()))
            .collect();

        if files.is_empty() {
            return Err(KattisError::NoSourceFiles);
        }
        Ok(Self { files })
    }

    /// Files in first-seen argument order.
    pub fn in_order(&self) -> &[SourceFile] {
        &self.files
    }

    /// The first file given on the command line.
    pub fn first(&self) -> &SourceFile {
        &self.files[0]
    }

    /// Files sorted by path.
    pub fn sorted(&self) -> Vec<SourceFile> {
        let mut files = self.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let file = SourceFile::from_bytes("some/dir/hello.cpp", "int main() {}");
        assert_eq!(file.extension(), ".cpp");
        assert_eq!(file.basename(), "hello.cpp");
        assert_eq!(file.stem(), "hello");
    }

    #[test]
    fn test_no_extension() {
        let file = SourceFile::from_bytes("Makefile", "");
        assert_eq!(file.extension(), "");
        assert_eq!(file.stem(), "Makefile");
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let set = SourceSet::new(vec![
            SourceFile::from_bytes("b.py", "x"),
            SourceFile::from_bytes("a.py", "y"),
            SourceFile::from_bytes("b.py", "z"),
        ])
        .unwrap();

        let order: Vec<_> = set.in_order().iter().map(|f| f.basename()).collect();
        assert_eq!(order, ["b.py", "a.py"]);

        let sorted: Vec<_> = set.sorted().iter().map(|f| f.basename()).collect();
        assert_eq!(sorted, ["a.py", "b.py"]);
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(
            SourceSet::new(Vec::new()),
            Err(KattisError::NoSourceFiles)
        ));
    }

    #[test]
    fn test_read_snapshots_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.c");
        std::fs::write(&path, "int main(){}").unwrap();

        let set = SourceSet::read(&[&path, &path]).unwrap();
        std::fs::write(&path, "changed").unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.first().content(), b"int main(){}");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.c");
        assert!(matches!(
            SourceSet::read(&[missing]),
            Err(KattisError::SourceRead { .. })
        ));
    }
}
