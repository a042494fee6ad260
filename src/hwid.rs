use serde::Serialize;
use thiserror::Error;

/// Espressif's USB vendor ID, shared by every ESP32-S3 native-USB board.
pub const WAKU_VID: u16 = 0x303A;
/// Product ID assigned to the WaKu Controller.
pub const WAKU_PID: u16 = 0x82E5;

/// A (vendor ID, product ID) pair as it appears in a board manifest.
///
/// Both halves are kept as the `0x`-prefixed hex string literals that get
/// written under `build.hwids`. The patch writes them verbatim without
/// checking that they parse; only the device-detection side needs them as
/// numbers (see [`HwidPair::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HwidPair {
    pub vid: String,
    pub pid: String,
}

#[derive(Error, Debug)]
pub enum HwidError {
    #[error("invalid hex id {value:?}: {msg}")]
    InvalidHex { value: String, msg: String },
}

impl HwidPair {
    pub fn new(vid: impl Into<String>, pid: impl Into<String>) -> Self {
        Self {
            vid: vid.into(),
            pid: pid.into(),
        }
    }

    /// Renders numeric IDs the way board manifests spell them (`0x303A`).
    pub fn from_ids(vid: u16, pid: u16) -> Self {
        Self {
            vid: format!("0x{vid:04X}"),
            pid: format!("0x{pid:04X}"),
        }
    }

    /// Numeric view, for matching against enumerated USB devices.
    pub fn parse(&self) -> Result<(u16, u16), HwidError> {
        Ok((parse_hex_u16(&self.vid)?, parse_hex_u16(&self.pid)?))
    }

    /// The two-element `[vid, pid]` JSON array used inside `build.hwids`.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Array(vec![
            serde_json::Value::from(self.vid.as_str()),
            serde_json::Value::from(self.pid.as_str()),
        ])
    }
}

/// Parses a `0x`-prefixed (or bare) hex literal into a `u16`.
pub fn parse_hex_u16(s: &str) -> Result<u16, HwidError> {
    let t = s.trim();
    let digits = t
        .strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .unwrap_or(t);
    if digits.is_empty() {
        return Err(HwidError::InvalidHex {
            value: s.to_string(),
            msg: "empty".to_string(),
        });
    }
    u16::from_str_radix(digits, 16).map_err(|e| HwidError::InvalidHex {
        value: s.to_string(),
        msg: e.to_string(),
    })
}
