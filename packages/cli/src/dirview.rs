//! Working directory listing for `dir-tree` and `dir-indent`

use htmled_editor::TreeSource;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

struct Entry {
    name: String,
    path: PathBuf,
    children: Vec<usize>,
}

/// Snapshot of a directory, with open documents marked
pub struct DirectoryTree {
    entries: Vec<Entry>,
    open: HashSet<PathBuf>,
    active: Option<PathBuf>,
}

impl DirectoryTree {
    /// Walk `root`, skipping hidden entries and files named in `skip`.
    /// Directories come before files; each group is sorted by name.
    pub fn scan(root: &Path, skip: &[&str]) -> Self {
        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut entries = vec![Entry {
            name: root_name,
            path: root.to_path_buf(),
            children: Vec::new(),
        }];
        let mut index: HashMap<PathBuf, usize> = HashMap::new();
        index.insert(root.to_path_buf(), 0);

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by(dirs_first)
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry) && !skip.iter().any(|s| entry.file_name() == *s));

        for entry in walker.filter_map(Result::ok) {
            let parent = entry
                .path()
                .parent()
                .and_then(|parent| index.get(parent).copied())
                .unwrap_or(0);

            let key = entries.len();
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                children: Vec::new(),
            });
            entries[parent].children.push(key);
            if entry.file_type().is_dir() {
                index.insert(entry.path().to_path_buf(), key);
            }
        }

        Self {
            entries,
            open: HashSet::new(),
            active: None,
        }
    }

    /// Mark open documents (`name *`) and the active one (`> name`)
    pub fn with_documents(
        mut self,
        open: impl IntoIterator<Item = PathBuf>,
        active: Option<PathBuf>,
    ) -> Self {
        self.open = open.into_iter().collect();
        self.active = active;
        self
    }
}

impl TreeSource for DirectoryTree {
    type Key = usize;

    fn root(&self) -> usize {
        0
    }

    fn children(&self, key: usize) -> Vec<usize> {
        self.entries[key].children.clone()
    }

    fn label(&self, key: usize) -> String {
        let entry = &self.entries[key];
        if key == 0 {
            return entry.name.clone();
        }

        let mut label = String::new();
        if self.active.as_ref() == Some(&entry.path) {
            label.push_str("> ");
        }
        label.push_str(&entry.name);
        if self.open.contains(&entry.path) {
            label.push_str(" *");
        }
        label
    }
}

fn dirs_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}
