//! Word list used by `spell-check` and by the `[X]` marks in `print-tree`

use anyhow::{Context, Result};
use htmled_editor::Lexicon;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_WORDS: &str = include_str!("words.txt");

const MAX_SUGGESTIONS: usize = 5;
const MAX_DISTANCE: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// The bundled English word list
    pub fn builtin() -> Self {
        let mut list = Self::default();
        list.extend(BUILTIN_WORDS.lines());
        list
    }

    /// Add every non-empty line of `path`, returning how many were read
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read dictionary {}", path.display()))?;
        let before = self.words.len();
        self.extend(content.lines());
        Ok(self.words.len() - before)
    }

    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            let word = word.trim();
            if !word.is_empty() {
                self.words.insert(word.to_lowercase());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

impl Lexicon for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let mut candidates: Vec<(usize, &String)> = self
            .words
            .iter()
            .filter(|candidate| candidate.len().abs_diff(word.len()) <= MAX_DISTANCE)
            .map(|candidate| (edit_distance(word, candidate), candidate))
            .filter(|(distance, _)| *distance <= MAX_DISTANCE)
            .collect();

        candidates.sort();
        candidates
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == *cb { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev + cost);
            prev = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_common_words() {
        let list = WordList::builtin();
        assert!(list.len() > 500);
        assert!(list.contains("hello"));
        assert!(list.contains("world"));
        assert!(!list.contains("wrold"));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
        assert_eq!(edit_distance("wrold", "world"), 2);
    }

    #[test]
    fn test_suggest_orders_by_distance() {
        let mut list = WordList::default();
        list.extend(["hello", "help", "hallo", "yellow", "zebra"]);

        let suggestions = list.suggest("helo");
        assert_eq!(suggestions[0], "hello");
        assert!(suggestions.contains(&"help".to_string()));
        assert!(!suggestions.contains(&"zebra".to_string()));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.txt");
        std::fs::write(&path, "Htmled\n\n  frobnicate \n").unwrap();

        let mut list = WordList::default();
        assert_eq!(list.load_file(&path).unwrap(), 2);
        assert!(list.contains("htmled"));
        assert!(list.contains("frobnicate"));
        assert!(list.load_file(&dir.path().join("missing.txt")).is_err());
    }
}
