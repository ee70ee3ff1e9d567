use crate::config::Config;
use crate::lexicon::WordList;
use anyhow::Result;
use htmled_editor::{DocumentManager, SessionState};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything a shell command can see: open documents, settings and the
/// spelling word list.
pub struct Context {
    pub manager: DocumentManager,
    pub config: Config,
    pub cwd: PathBuf,
    lexicon: WordList,
}

impl Context {
    pub fn new(config: Config, cwd: PathBuf) -> Self {
        let mut lexicon = WordList::builtin();
        if let Some(dictionary) = &config.dictionary {
            let path = cwd.join(dictionary);
            match lexicon.load_file(&path) {
                Ok(count) => debug!(path = %path.display(), words = count, "loaded dictionary"),
                Err(err) => warn!(error = %err, "dictionary not loaded"),
            }
        }
        lexicon.extend(config.ignored_words.iter().map(String::as_str));
        debug!(words = lexicon.len(), "spelling word list ready");

        Self {
            manager: DocumentManager::new(),
            config,
            cwd,
            lexicon,
        }
    }

    pub fn lexicon(&self) -> &WordList {
        &self.lexicon
    }

    pub fn session_path(&self) -> PathBuf {
        self.config.session_path(&self.cwd)
    }

    /// Re-open the documents of the previous session, returning how many
    /// were restored. Problems are logged and skipped.
    pub fn restore_session(&mut self) -> usize {
        let path = self.session_path();
        let state = match SessionState::load(&path) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read session");
                return 0;
            }
        };

        let options = self.config.document_options();
        for (file, err) in self.manager.restore(&state, &options) {
            warn!(path = %file.display(), error = %err, "skipped session file");
        }
        info!(documents = self.manager.len(), "restored session");
        self.manager.len()
    }

    pub fn save_session(&self) -> Result<()> {
        self.manager.snapshot().save(&self.session_path())?;
        Ok(())
    }
}
