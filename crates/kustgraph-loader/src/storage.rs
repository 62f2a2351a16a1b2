//! Storage capability the loader reads through, with an on-disk and an
//! in-memory implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use crate::resolve::{normalize, to_slash};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        DirEntry {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        DirEntry {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Read-only access to a hierarchical file store.
pub trait Storage {
    /// List the entries directly inside `path`.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read the full contents of the file at `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        (**self).list_dir(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsStorage;

impl Storage for OsStorage {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            // Symlinks count as whatever they point at.
            let is_dir = if file_type.is_symlink() {
                entry.path().is_dir()
            } else {
                file_type.is_dir()
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// In-memory file store keyed by normalized slash paths. Adding a file or
/// directory creates all of its ancestors.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty directory (and its ancestors).
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let normalized = normalize(path.as_ref());
        for ancestor in normalized.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(to_slash(ancestor));
        }
        self
    }

    /// Add a file with the given contents, replacing any previous contents.
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> &mut Self {
        let normalized = normalize(path.as_ref());
        if let Some(parent) = normalized.parent() {
            self.add_dir(parent);
        }
        self.files.insert(to_slash(&normalized), contents.into());
        self
    }

    /// Builder form of [`add_file`](Self::add_file).
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Builder form of [`add_dir`](Self::add_dir).
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    fn children<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.dirs
            .iter()
            .chain(self.files.keys())
            .map(String::as_str)
            .filter(move |key| {
                Path::new(key)
                    .parent()
                    .is_some_and(|p| to_slash(p) == parent)
                    && *key != parent
            })
    }
}

impl Storage for MemoryStorage {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let key = to_slash(&normalize(path));
        if !self.dirs.contains(&key) {
            let kind = if self.files.contains_key(&key) {
                io::ErrorKind::NotADirectory
            } else {
                io::ErrorKind::NotFound
            };
            return Err(io::Error::new(kind, format!("no directory at {}", key)));
        }

        let entries = self
            .children(&key)
            .filter_map(|child| {
                let name = Path::new(child).file_name()?.to_string_lossy().into_owned();
                Some(DirEntry {
                    name,
                    is_dir: self.dirs.contains(child),
                })
            })
            .collect();
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let key = to_slash(&normalize(path));
        self.files.get(&key).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no file at {}", key))
        })
    }
}
