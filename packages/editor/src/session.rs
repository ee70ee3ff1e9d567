//! # Session Snapshot
//!
//! Which files were open, with their display settings, and which one was
//! active. Written when the shell exits and read back on the next start.
//!
//! ```json
//! { "files": [{ "path": "a.html", "showId": true }], "activeFile": "a.html" }
//! ```

use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub files: Vec<SessionFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    pub path: PathBuf,

    #[serde(default = "default_show_id")]
    pub show_id: bool,
}

fn default_show_id() -> bool {
    true
}

impl SessionState {
    /// Read a snapshot. A missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        if !path.exists() {
            debug!(path = %path.display(), "no session file");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), files = self.files.len(), "saved session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let state = SessionState {
            files: vec![SessionFile {
                path: PathBuf::from("a.html"),
                show_id: false,
            }],
            active_file: Some(PathBuf::from("a.html")),
        };

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"files":[{"path":"a.html","showId":false}],"activeFile":"a.html"}"#
        );
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let state: SessionState = serde_json::from_str(r#"{"files":[{"path":"b.html"}]}"#).unwrap();
        assert!(state.files[0].show_id);
        assert_eq!(state.active_file, None);

        let empty: SessionState = serde_json::from_str("{}").unwrap();
        assert!(empty.files.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState::load(&dir.path().join("session.json")).unwrap();
        assert!(state.files.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let state = SessionState {
            files: vec![SessionFile {
                path: PathBuf::from("x.html"),
                show_id: true,
            }],
            active_file: None,
        };

        state.save(&path).unwrap();
        assert_eq!(SessionState::load(&path).unwrap(), state);
    }
}
