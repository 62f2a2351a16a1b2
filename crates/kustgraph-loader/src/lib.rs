//! Overlay directory access: storage capability, manifest decoding,
//! resource auditing, and base path resolution.

pub mod audit;
pub mod error;
pub mod manifest;
pub mod resolve;
pub mod storage;


#[cfg(test)]
pub mod test_utils;

pub use audit::{RESOURCE_EXTENSIONS, find_missing};
pub use error::{LoaderError, Result};
pub use manifest::{MANIFEST_FILE_NAMES, Manifest, PatchRef, find_manifest, load_manifest};
pub use resolve::{absolutize, canonical_id, normalize, resolve_base, to_slash};
pub use storage::{DirEntry, MemoryStorage, OsStorage, Storage};
