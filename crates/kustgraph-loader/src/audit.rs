//! Resource audit: files in an overlay directory that its manifest never mentions

use std::path::Path;

use crate::error::{LoaderError, Result};
use crate::manifest::{MANIFEST_FILE_NAMES, Manifest};
use crate::storage::Storage;

/// Extensions of files treated as declarative resources.
pub const RESOURCE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// List the resource files directly inside `dir` that are not declared in
/// `manifest`, sorted by name. Matching is by exact file name.
pub fn find_missing<S: Storage + ?Sized>(
    storage: &S,
    dir: &Path,
    manifest: &Manifest,
) -> Result<Vec<String>> {
    let entries = storage
        .list_dir(dir)
        .map_err(|source| LoaderError::directory_read(dir, source))?;
    let declared = manifest.declared_files();

    let mut missing: Vec<String> = entries
        .into_iter()
        .filter(|entry| !entry.is_dir)
        .map(|entry| entry.name)
        .filter(|name| is_resource_file(name))
        .filter(|name| !MANIFEST_FILE_NAMES.contains(&name.as_str()))
        .filter(|name| !declared.contains(name.as_str()))
        .collect();
    missing.sort();

    if !missing.is_empty() {
        tracing::debug!("{} has {} undeclared resources", dir.display(), missing.len());
    }
    Ok(missing)
}

fn is_resource_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RESOURCE_EXTENSIONS.contains(&ext))
}
