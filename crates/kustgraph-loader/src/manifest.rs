//! Kustomization manifest discovery and decoding

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::{LoaderError, Result};
use crate::storage::Storage;

/// File names recognised as a directory's manifest, in order of preference
/// for error messages.
pub const MANIFEST_FILE_NAMES: [&str; 3] =
    ["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// The parts of a kustomization file that describe composition.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Directories this overlay builds upon, relative to the manifest.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bases: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resources: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub patches: Vec<PatchRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub patches_strategic_merge: Vec<String>,
}

/// A `patches` entry: either a bare file name or a patch spec mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatchRef {
    File(String),
    Spec {
        #[serde(default)]
        path: Option<String>,
    },
}

impl PatchRef {
    /// The patch file this entry points at, if any. Inline patches have none.
    pub fn file(&self) -> Option<&str> {
        match self {
            PatchRef::File(name) => Some(name),
            PatchRef::Spec { path } => path.as_deref(),
        }
    }
}

impl Manifest {
    /// Decode manifest bytes. Empty and comment-only documents decode to an
    /// empty manifest.
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self> {
        let parse_error = |source: serde_yaml::Error| LoaderError::ManifestParse {
            path: path.to_path_buf(),
            source,
        };
        if is_blank(bytes) {
            return Ok(Manifest::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(parse_error)?;
        if value.is_null() {
            return Ok(Manifest::default());
        }
        serde_yaml::from_value(value).map_err(parse_error)
    }

    /// Every file name the manifest explicitly consumes:
    /// `resources ∪ patches ∪ patchesStrategicMerge`.
    pub fn declared_files(&self) -> BTreeSet<&str> {
        self.resources
            .iter()
            .map(String::as_str)
            .chain(self.patches.iter().filter_map(PatchRef::file))
            .chain(self.patches_strategic_merge.iter().map(String::as_str))
            .collect()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_blank(bytes: &[u8]) -> bool {
    String::from_utf8_lossy(bytes).lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Locate the single manifest file in `dir`.
pub fn find_manifest<S: Storage + ?Sized>(storage: &S, dir: &Path) -> Result<PathBuf> {
    let entries = storage
        .list_dir(dir)
        .map_err(|source| LoaderError::directory_read(dir, source))?;

    let present: BTreeSet<&str> = entries
        .iter()
        .filter(|entry| !entry.is_dir)
        .map(|entry| entry.name.as_str())
        .collect();
    let found: Vec<&str> = MANIFEST_FILE_NAMES
        .iter()
        .copied()
        .filter(|name| present.contains(name))
        .collect();

    match found.as_slice() {
        [] => Err(LoaderError::ManifestNotFound {
            dir: dir.to_path_buf(),
        }),
        [name] => Ok(dir.join(name)),
        names => Err(LoaderError::ManifestAmbiguous {
            dir: dir.to_path_buf(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }),
    }
}

/// Locate, read and decode the manifest of `dir`.
pub fn load_manifest<S: Storage + ?Sized>(storage: &S, dir: &Path) -> Result<Manifest> {
    let path = find_manifest(storage, dir)?;
    let bytes = storage
        .read_file(&path)
        .map_err(|source| LoaderError::file_read(&path, source))?;
    let manifest = Manifest::from_slice(&bytes, &path)?;
    tracing::debug!(
        "Loaded {} ({} bases, {} declared files)",
        path.display(),
        manifest.bases.len(),
        manifest.declared_files().len()
    );
    Ok(manifest)
}
