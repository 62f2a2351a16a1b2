//! Test fixtures for overlay trees

use crate::storage::MemoryStorage;
use std::fs;
use tempfile::TempDir;

/// Create a temporary on-disk tree with the given `(relative path, contents)` files
pub fn create_tree(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        // Create parent directories if needed
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// Build an in-memory tree with the given `(absolute path, contents)` files
pub fn memory_tree(structure: &[(&str, &str)]) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    for (path, content) in structure {
        storage.add_file(path, content.as_bytes());
    }
    storage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DirEntry, Storage};
    use std::path::Path;

    #[test]
    fn test_create_tree() {
        let temp_dir = create_tree(&[("app/kustomization.yaml", ""), ("app/base/a.yaml", "")]);
        let root = temp_dir.path();

        assert!(root.join("app/kustomization.yaml").exists());
        assert!(root.join("app/base/a.yaml").exists());
    }

    #[test]
    fn test_memory_tree_creates_ancestors() {
        let storage = memory_tree(&[("/app/base/kustomization.yaml", "")]);

        let root = storage.list_dir(Path::new("/")).unwrap();
        assert_eq!(root, vec![DirEntry::dir("app")]);
        let app = storage.list_dir(Path::new("/app")).unwrap();
        assert_eq!(app, vec![DirEntry::dir("base")]);
    }
}
