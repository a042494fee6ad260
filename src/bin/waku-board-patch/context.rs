use std::time::Duration;

use waku_board_patch::patch::BoardPatch;

use crate::cli;

pub fn wait_timeout(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}

/// Builds the patch to apply: the stock WaKu patch, with any CLI overrides
/// written in verbatim (unparsed, exactly like the manifest literals).
pub fn patch_from_args(hwid: &cli::HwidArgs, extra_flags: &[String]) -> BoardPatch {
    let mut patch = BoardPatch::waku();

    if let Some(pair) = patch.hwids.first_mut() {
        if let Some(vid) = &hwid.vid {
            pair.vid = vid.clone();
        }
        if let Some(pid) = &hwid.pid {
            pair.pid = pid.clone();
        }
    }

    patch.cxx_flags.extend(extra_flags.iter().cloned());
    patch
}
