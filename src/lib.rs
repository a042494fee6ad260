//! Build-environment and board-manifest patching for the WaKu Controller
//! (ESP32-S3, USB `0x303A:0x82E5`).
//!
//! The library models the two handles the build tool hands a config patch:
//! a [`env::BuildEnv`] with per-scope compiler-flag lists and a
//! [`board::BoardConfig`] manifest with dotted keys. A [`patch::BoardPatch`]
//! is applied to both with explicit context passing. [`api`]
//! wraps that for manifest files, and [`ports`] checks whether a device
//! carrying the injected IDs is actually attached.

pub mod api;
pub mod board;
pub mod env;
pub mod hwid;
pub mod operation;
pub mod patch;
pub mod ports;
