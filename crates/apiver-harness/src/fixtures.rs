//! Control file discovery
//!
//! Fixtures are laid out one directory per API version:
//!
//! ```text
//! api-version-data/
//!   v1.23/
//!     containers.json
//!   v1.24/
//!     containers.json
//!     version.json
//! ```

use crate::error::{ControlError, ControlResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A control file and the version tag it runs under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub version: String,
    pub path: PathBuf,
}

/// Source of control files to run, in order
pub trait FixtureEnumerator {
    fn fixtures(&self) -> ControlResult<Vec<Fixture>>;
}

/// Enumerates `<root>/<version>/<control file>`, sorted by name.
///
/// Entries whose name starts with `.` are skipped.
#[derive(Debug, Clone)]
pub struct DirectoryFixtures {
    root: PathBuf,
}

impl DirectoryFixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FixtureEnumerator for DirectoryFixtures {
    fn fixtures(&self) -> ControlResult<Vec<Fixture>> {
        let mut fixtures = Vec::new();

        for version_dir in dir_entries(&self.root, EntryKind::Dir)? {
            let version = file_name(&version_dir);
            debug!("Directory: {}", version);

            for path in dir_entries(&version_dir, EntryKind::File)? {
                fixtures.push(Fixture {
                    version: version.clone(),
                    path,
                });
            }
        }

        Ok(fixtures)
    }
}

#[derive(Clone, Copy)]
enum EntryKind {
    Dir,
    File,
}

/// Sorted, non-hidden entries of `dir` of the given kind
fn dir_entries(dir: &Path, kind: EntryKind) -> ControlResult<Vec<PathBuf>> {
    let io_error = |e: std::io::Error| ControlError::Io {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if file_name(&path).starts_with('.') {
            continue;
        }
        let wanted = match kind {
            EntryKind::Dir => path.is_dir(),
            EntryKind::File => path.is_file(),
        };
        if wanted {
            entries.push(path);
        }
    }

    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "[]").unwrap();
    }

    #[test]
    fn test_versions_and_files_are_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "v1.24/version.json");
        touch(dir.path(), "v1.24/containers.json");
        touch(dir.path(), "v1.23/info.json");

        let fixtures = DirectoryFixtures::new(dir.path()).fixtures().unwrap();
        let listed: Vec<_> = fixtures
            .iter()
            .map(|f| (f.version.as_str(), file_name(&f.path)))
            .collect();

        assert_eq!(
            listed,
            vec![
                ("v1.23", "info.json".to_string()),
                ("v1.24", "containers.json".to_string()),
                ("v1.24", "version.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_root_files_and_nested_dirs_are_not_fixtures() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md");
        touch(dir.path(), "v1.24/nested/deep.json");
        touch(dir.path(), "v1.24/top.json");

        let fixtures = DirectoryFixtures::new(dir.path()).fixtures().unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].path, dir.path().join("v1.24").join("top.json"));
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".git/config");
        touch(dir.path(), "v1.24/.swp");
        touch(dir.path(), "v1.24/info.json");

        let fixtures = DirectoryFixtures::new(dir.path()).fixtures().unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].version, "v1.24");
    }

    #[test]
    fn test_missing_root_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let err = DirectoryFixtures::new(&missing).fixtures().unwrap_err();
        assert!(matches!(err, ControlError::Io { ref path, .. } if path == &missing));
    }
}
