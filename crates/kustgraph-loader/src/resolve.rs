//! Base reference resolution and canonical path forms

use std::path::{Component, Path, PathBuf};

use crate::error::{LoaderError, Result};

/// Resolve a `bases` entry declared by the manifest in `current` to the
/// absolute directory it names.
///
/// `same`, `./same` and `same/` all name the same child of `current`;
/// `../base` steps out of `current` first. No filesystem access is done, so
/// the result is purely lexical and does not follow symlinks.
pub fn resolve_base(current: &Path, reference: &str) -> Result<PathBuf> {
    let mut reference = reference.trim();
    while let Some(rest) = reference.strip_prefix("./") {
        reference = rest;
    }
    absolutize(&current.join(reference))
}

/// Make `path` absolute against the working directory and normalize it.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let absolute = std::path::absolute(path).map_err(|source| LoaderError::Resolve {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize(&absolute))
}

/// The canonical node identity of a directory: absolute, normalized and
/// forward-slash separated.
pub fn canonical_id(dir: &Path) -> Result<String> {
    Ok(to_slash(&absolutize(dir)?))
}

/// Lexically remove `.` and `..` components. A `..` at the filesystem root
/// stays at the root; leading `..` of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts.iter().collect()
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&component.as_os_str().to_string_lossy());
            }
        }
    }
    if out.is_empty() {
        out.push('.');
    }
    out
}
