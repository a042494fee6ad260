use crate::board::{BoardConfig, BoardConfigError};
use crate::env::{BuildEnv, FlagScope};
use crate::hwid::{HwidError, HwidPair, WAKU_PID, WAKU_VID};

/// Board-manifest key the USB IDs live under.
pub const HWIDS_KEY: &str = "build.hwids";

/// The Arduino core builds as gnu++2a; these keep it quiet about deprecated
/// compound `volatile` use and let its looser casts through.
pub const WAKU_CXX_FLAGS: [&str; 2] = ["-Wno-volatile", "-fpermissive"];

/// A build-configuration patch: C++ flags to append plus the USB ID pairs to
/// install under [`HWIDS_KEY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPatch {
    pub cxx_flags: Vec<String>,
    pub hwids: Vec<HwidPair>,
}

impl Default for BoardPatch {
    fn default() -> Self {
        Self::waku()
    }
}

impl BoardPatch {
    /// The stock WaKu Controller patch.
    pub fn waku() -> Self {
        Self {
            cxx_flags: WAKU_CXX_FLAGS.iter().map(|s| s.to_string()).collect(),
            hwids: vec![HwidPair::from_ids(WAKU_VID, WAKU_PID)],
        }
    }

    /// JSON value installed under [`HWIDS_KEY`]: a list of `[vid, pid]`
    /// string pairs.
    pub fn hwids_value(&self) -> serde_json::Value {
        serde_json::Value::Array(self.hwids.iter().map(HwidPair::to_value).collect())
    }

    /// Numeric (vid, pid) pairs, for matching enumerated USB devices.
    pub fn id_pairs(&self) -> Result<Vec<(u16, u16)>, HwidError> {
        self.hwids.iter().map(HwidPair::parse).collect()
    }

    /// Applies the patch to the two host handles.
    ///
    /// Flags go in first, then [`HWIDS_KEY`] is overwritten with the pair
    /// list. A failed key update does not roll the flag append back. The
    /// vid/pid strings are written exactly as given; nothing validates them
    /// here.
    pub fn apply(
        &self,
        env: &mut BuildEnv,
        board: &mut BoardConfig,
    ) -> Result<(), BoardConfigError> {
        env.append(FlagScope::Cxx, self.cxx_flags.iter().cloned());
        board.update(HWIDS_KEY, self.hwids_value())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_to_empty_env_and_board() {
        let mut env = BuildEnv::new();
        let mut board = BoardConfig::new();

        BoardPatch::waku().apply(&mut env, &mut board).unwrap();

        assert_eq!(
            env.flags(FlagScope::Cxx),
            ["-Wno-volatile", "-fpermissive"]
        );
        assert_eq!(
            board.get(HWIDS_KEY),
            Some(&json!([["0x303A", "0x82E5"]]))
        );
    }

    #[test]
    fn test_apply_appends_after_existing_flags() {
        let mut env = BuildEnv::new();
        env.append(FlagScope::Cxx, ["-Os", "-std=gnu++2a"]);
        let mut board = BoardConfig::new();

        BoardPatch::waku().apply(&mut env, &mut board).unwrap();

        assert_eq!(
            env.flags(FlagScope::Cxx),
            ["-Os", "-std=gnu++2a", "-Wno-volatile", "-fpermissive"]
        );
    }

    #[test]
    fn test_apply_overwrites_prior_hwids() {
        let mut env = BuildEnv::new();
        let mut board = BoardConfig::new();
        board
            .update(HWIDS_KEY, json!([["0x16C0", "0x0483"], ["0x16C0", "0x0489"]]))
            .unwrap();

        BoardPatch::waku().apply(&mut env, &mut board).unwrap();

        assert_eq!(
            board.get(HWIDS_KEY),
            Some(&json!([["0x303A", "0x82E5"]]))
        );
    }

    #[test]
    fn test_double_apply_duplicates_flags_but_not_hwids() {
        let mut env = BuildEnv::new();
        let mut board = BoardConfig::new();
        let patch = BoardPatch::waku();

        patch.apply(&mut env, &mut board).unwrap();
        patch.apply(&mut env, &mut board).unwrap();

        // Flag appends are not idempotent; the hwids overwrite is.
        assert_eq!(
            env.flags(FlagScope::Cxx),
            ["-Wno-volatile", "-fpermissive", "-Wno-volatile", "-fpermissive"]
        );
        assert_eq!(
            board.get(HWIDS_KEY),
            Some(&json!([["0x303A", "0x82E5"]]))
        );
    }

    #[test]
    fn test_flags_land_before_a_failing_hwids_update() {
        let mut env = BuildEnv::new();
        let mut board = BoardConfig::new();
        // `build` as a scalar makes the hwids update fail.
        board.update("build", json!("esp32s3")).unwrap();

        let err = BoardPatch::waku().apply(&mut env, &mut board).unwrap_err();
        assert!(matches!(err, BoardConfigError::PathConflict { .. }));

        // Flags were appended before the update faulted and stay appended.
        assert_eq!(
            env.flags(FlagScope::Cxx),
            ["-Wno-volatile", "-fpermissive"]
        );
        assert_eq!(board.get("build"), Some(&json!("esp32s3")));
    }

    #[test]
    fn test_id_pairs() {
        assert_eq!(
            BoardPatch::waku().id_pairs().unwrap(),
            vec![(0x303A, 0x82E5)]
        );

        let mut patch = BoardPatch::waku();
        patch.hwids.push(HwidPair::new("garbage", "0x0001"));
        assert!(patch.id_pairs().is_err());
    }
}
