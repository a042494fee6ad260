use std::path::PathBuf;

use crate::env::FlagScope;
use crate::hwid::HwidPair;

/// Progress events emitted while patching a manifest file.
#[derive(Debug, Clone)]
pub enum PatchEvent {
    ManifestLoaded {
        path: PathBuf,
        keys: usize,
    },
    /// The manifest file was absent and the operation is starting from an
    /// empty one.
    ManifestMissing {
        path: PathBuf,
    },

    FlagsAppended {
        scope: FlagScope,
        flags: Vec<String>,
        total: usize,
    },
    HwidsSet {
        key: String,
        pairs: Vec<HwidPair>,
    },

    ManifestWritten {
        path: PathBuf,
        bytes: usize,
    },
}
