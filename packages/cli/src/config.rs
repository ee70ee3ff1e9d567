use htmled_editor::DocumentOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "htmled.config.json";

/// htmled configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Spaces per level for saved markup and `print-indent`
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Show `#id` in tree views of newly opened documents
    #[serde(default = "default_show_id")]
    pub show_id: bool,

    /// Undo levels per document (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Session snapshot file, relative to the working directory
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Extra word list for spell checking, one word per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,

    /// Words never reported as misspelled
    #[serde(default)]
    pub ignored_words: Vec<String>,
}

fn default_indent() -> usize {
    2
}

fn default_show_id() -> bool {
    true
}

fn default_history_limit() -> usize {
    100
}

fn default_session_file() -> String {
    "session.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        Self::load_file(&cwd.join(DEFAULT_CONFIG_NAME))
    }

    /// Load config from an explicit file; a missing file gives the defaults
    pub fn load_file(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the session file
    pub fn session_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.session_file)
    }

    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            indent: self.indent,
            show_id: self.show_id,
            history_limit: self.history_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            show_id: default_show_id(),
            history_limit: default_history_limit(),
            session_file: default_session_file(),
            dictionary: None,
            ignored_words: vec![],
        }
    }
}
