use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// The host build tool's per-target board metadata, a JSON object addressed
/// with dotted key paths (`build.hwids`, `upload.speed`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardConfig {
    root: Map<String, Value>,
}

#[derive(Error, Debug)]
pub enum BoardConfigError {
    #[error("invalid configuration key {key:?}")]
    InvalidKey { key: String },

    #[error("key {key:?} crosses non-object value at {segment:?} (found {found})")]
    PathConflict {
        key: String,
        segment: String,
        found: &'static str,
    },

    #[error("unable to read manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("manifest {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest root of {path} is not a JSON object")]
    NotAnObject { path: String },

    #[error("unable to serialize manifest {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to write manifest {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, BoardConfigError> {
        let text = fs::read_to_string(path).map_err(|e| BoardConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| BoardConfigError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(BoardConfigError::NotAnObject {
                path: path.display().to_string(),
            }),
        }
    }

    /// Writes the manifest as pretty-printed JSON. Returns the number of
    /// bytes written.
    pub fn save(&self, path: &Path) -> Result<usize, BoardConfigError> {
        let mut text = serde_json::to_string_pretty(&Value::Object(self.root.clone()))
            .map_err(|e| BoardConfigError::Serialize {
                path: path.display().to_string(),
                source: e,
            })?;
        text.push('\n');
        fs::write(path, &text).map_err(|e| BoardConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(text.len())
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Dotted-path lookup. `get("build.hwids")` reads `root["build"]["hwids"]`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut cur = self.root.get(first)?;
        for seg in segments {
            cur = cur.as_object()?.get(seg)?;
        }
        Some(cur)
    }

    /// Sets a dotted key, overwriting whatever the leaf held before and
    /// returning it. Missing intermediate objects are created.
    ///
    /// A path segment that lands on an existing non-object value is a
    /// [`BoardConfigError::PathConflict`]; the manifest is left untouched in
    /// that case (conflicts are only possible before the first segment this
    /// call creates).
    pub fn update(&mut self, key: &str, value: Value) -> Result<Option<Value>, BoardConfigError> {
        let segments: Vec<&str> = key.split('.').collect();
        if key.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(BoardConfigError::InvalidKey {
                key: key.to_string(),
            });
        }

        let mut cur = &mut self.root;
        for seg in &segments[..segments.len() - 1] {
            let entry = cur
                .entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(m) => cur = m,
                other => {
                    return Err(BoardConfigError::PathConflict {
                        key: key.to_string(),
                        segment: seg.to_string(),
                        found: json_type_name(other),
                    });
                }
            }
        }

        Ok(cur.insert(segments[segments.len() - 1].to_string(), value))
    }
}

impl From<Map<String, Value>> for BoardConfig {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board_from(value: Value) -> BoardConfig {
        match value {
            Value::Object(m) => BoardConfig::from(m),
            _ => panic!("test manifest must be an object"),
        }
    }

    #[test]
    fn test_update_creates_nested_objects() {
        let mut board = BoardConfig::new();
        let prev = board.update("build.hwids", json!([["0x303A", "0x82E5"]])).unwrap();
        assert!(prev.is_none());
        assert_eq!(
            board.get("build.hwids"),
            Some(&json!([["0x303A", "0x82E5"]]))
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_update_overwrites_leaf_and_returns_previous() {
        let mut board = board_from(json!({
            "build": { "hwids": [["0x16C0", "0x0483"]], "mcu": "esp32s3" }
        }));
        let prev = board.update("build.hwids", json!([["0x303A", "0x82E5"]])).unwrap();
        assert_eq!(prev, Some(json!([["0x16C0", "0x0483"]])));
        // Sibling keys survive; only the leaf is replaced.
        assert_eq!(board.get("build.mcu"), Some(&json!("esp32s3")));
    }

    #[test]
    fn test_update_refuses_non_object_intermediate() {
        let mut board = board_from(json!({ "build": "esp32s3" }));
        let err = board.update("build.hwids", json!([])).unwrap_err();
        match err {
            BoardConfigError::PathConflict { segment, found, .. } => {
                assert_eq!(segment, "build");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Failed update leaves the manifest as it was.
        assert_eq!(board.get("build"), Some(&json!("esp32s3")));
    }

    #[test]
    fn test_update_rejects_malformed_keys() {
        let mut board = BoardConfig::new();
        assert!(matches!(
            board.update("", json!(1)),
            Err(BoardConfigError::InvalidKey { .. })
        ));
        assert!(matches!(
            board.update("build..hwids", json!(1)),
            Err(BoardConfigError::InvalidKey { .. })
        ));
        assert!(board.is_empty());
    }

    #[test]
    fn test_get_dotted_paths() {
        let board = board_from(json!({
            "name": "WaKu Controller",
            "build": { "flash_mode": "qio" }
        }));
        assert_eq!(board.get("name"), Some(&json!("WaKu Controller")));
        assert_eq!(board.get("build.flash_mode"), Some(&json!("qio")));
        assert_eq!(board.get("build.missing"), None);
        assert_eq!(board.get("name.deeper"), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waku_s3.json");

        let mut board = BoardConfig::new();
        board.update("build.hwids", json!([["0x303A", "0x82E5"]])).unwrap();
        let bytes = board.save(&path).unwrap();
        assert!(bytes > 0);

        let reloaded = BoardConfig::load(&path).unwrap();
        assert_eq!(reloaded, board);
    }

    #[test]
    fn test_load_rejects_non_object_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2, 3]\n").unwrap();
        assert!(matches!(
            BoardConfig::load(&path),
            Err(BoardConfigError::NotAnObject { .. })
        ));
    }
}
