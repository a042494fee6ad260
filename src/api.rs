use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::board::{BoardConfig, BoardConfigError};
use crate::env::{BuildEnv, FlagScope};
use crate::operation::PatchEvent;
use crate::patch::{BoardPatch, HWIDS_KEY};

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Start from an empty manifest when the file does not exist.
    pub create_missing: bool,

    /// Write the patched manifest here instead of back in place.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ApplyErrorKind {
    InvalidManifest,
    KeyConflict,
    WriteFailed,
}

#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("invalid manifest: {source}")]
    Manifest {
        #[source]
        source: BoardConfigError,
    },

    #[error("patch failed: {source}")]
    Patch {
        #[source]
        source: BoardConfigError,
    },

    #[error("write failed: {source}")]
    Write {
        #[source]
        source: BoardConfigError,
    },
}

impl ApplyError {
    pub fn kind(&self) -> ApplyErrorKind {
        match self {
            ApplyError::Manifest { .. } => ApplyErrorKind::InvalidManifest,
            ApplyError::Patch { .. } => ApplyErrorKind::KeyConflict,
            ApplyError::Write { .. } => ApplyErrorKind::WriteFailed,
        }
    }
}

/// A patched manifest that has not necessarily been written yet.
#[derive(Debug)]
pub struct PatchPlan {
    pub env: BuildEnv,
    pub board: BoardConfig,
    /// True when the manifest file was absent and the plan started empty.
    pub created: bool,
    /// Where [`apply_patch`] writes the result.
    pub destination: PathBuf,
}

/// Loads (or creates) the manifest and applies `patch` to it in memory.
///
/// This is the dry-run half of [`apply_patch`]: nothing touches the
/// filesystem beyond the initial read.
pub fn plan_patch<F>(
    manifest: &Path,
    patch: &BoardPatch,
    opts: &ApplyOptions,
    mut on_event: F,
) -> Result<PatchPlan, ApplyError>
where
    F: FnMut(PatchEvent),
{
    let (mut board, created) = load_manifest(manifest, opts, &mut on_event)?;

    let mut env = BuildEnv::new();
    patch
        .apply(&mut env, &mut board)
        .map_err(|e| ApplyError::Patch { source: e })?;

    on_event(PatchEvent::FlagsAppended {
        scope: FlagScope::Cxx,
        flags: patch.cxx_flags.clone(),
        total: env.flags(FlagScope::Cxx).len(),
    });
    on_event(PatchEvent::HwidsSet {
        key: HWIDS_KEY.to_string(),
        pairs: patch.hwids.clone(),
    });

    Ok(PatchPlan {
        env,
        board,
        created,
        destination: opts
            .output
            .clone()
            .unwrap_or_else(|| manifest.to_path_buf()),
    })
}

/// Applies `patch` to the manifest file and writes the result to
/// `opts.output`, or back in place when unset.
pub fn apply_patch<F>(
    manifest: &Path,
    patch: &BoardPatch,
    opts: &ApplyOptions,
    mut on_event: F,
) -> Result<PatchPlan, ApplyError>
where
    F: FnMut(PatchEvent),
{
    let plan = plan_patch(manifest, patch, opts, &mut on_event)?;

    let bytes = plan
        .board
        .save(&plan.destination)
        .map_err(|e| ApplyError::Write { source: e })?;
    debug!(path = %plan.destination.display(), bytes, "manifest written");
    on_event(PatchEvent::ManifestWritten {
        path: plan.destination.clone(),
        bytes,
    });

    Ok(plan)
}

/// What a manifest currently says about the device's USB IDs.
#[derive(Debug, Clone)]
pub struct ManifestReport {
    pub path: PathBuf,
    pub keys: usize,
    pub hwids: Option<serde_json::Value>,
    /// True when `build.hwids` already equals what the patch would install.
    pub patched: bool,
}

pub fn inspect_manifest(
    manifest: &Path,
    patch: &BoardPatch,
) -> Result<ManifestReport, ApplyError> {
    let board =
        BoardConfig::load(manifest).map_err(|e| ApplyError::Manifest { source: e })?;
    let hwids = board.get(HWIDS_KEY).cloned();
    let patched = hwids.as_ref() == Some(&patch.hwids_value());
    Ok(ManifestReport {
        path: manifest.to_path_buf(),
        keys: board.len(),
        hwids,
        patched,
    })
}

fn load_manifest<F>(
    path: &Path,
    opts: &ApplyOptions,
    on_event: &mut F,
) -> Result<(BoardConfig, bool), ApplyError>
where
    F: FnMut(PatchEvent),
{
    if opts.create_missing && !path.exists() {
        debug!(path = %path.display(), "manifest missing, starting empty");
        on_event(PatchEvent::ManifestMissing {
            path: path.to_path_buf(),
        });
        return Ok((BoardConfig::new(), true));
    }

    let board = BoardConfig::load(path).map_err(|e| ApplyError::Manifest { source: e })?;
    on_event(PatchEvent::ManifestLoaded {
        path: path.to_path_buf(),
        keys: board.len(),
    });
    Ok((board, false))
}
