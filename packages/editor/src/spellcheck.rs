//! Text extraction and the spell-check boundary.
//!
//! The editor only knows how to pull words out of a tree in a stable order.
//! Whether a word is spelled correctly is up to a [`Lexicon`] supplied by
//! the caller.

use crate::tree::DocumentTree;
use serde::Serialize;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// One word of one element's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFragment {
    pub node_id: String,
    pub word: String,
    /// Position of the word within its element's text
    pub index: usize,
}

impl DocumentTree {
    /// Every word of every element's text, in depth-first pre-order.
    ///
    /// Tokens without a letter (numbers, stray symbols) are dropped.
    pub fn extract_text(&self) -> Vec<TextFragment> {
        let mut fragments = Vec::new();
        for (key, _) in self.traverse() {
            let Some(node) = self.node(key) else {
                continue;
            };
            let Some(text) = node.text() else {
                continue;
            };
            let words = text
                .unicode_words()
                .filter(|word| word.chars().any(char::is_alphabetic));
            for (index, word) in words.enumerate() {
                fragments.push(TextFragment {
                    node_id: node.id().to_string(),
                    word: word.to_string(),
                    index,
                });
            }
        }
        fragments
    }
}

/// Word list used to judge spelling. Lookups receive lower-case words.
pub trait Lexicon {
    fn contains(&self, word: &str) -> bool;

    /// Close matches for an unknown word, best first
    fn suggest(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

impl Lexicon for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Misspelling {
    pub node_id: String,
    pub word: String,
    pub index: usize,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpellReport {
    pub words_checked: usize,
    pub misspellings: Vec<Misspelling>,
}

impl SpellReport {
    pub fn is_clean(&self) -> bool {
        self.misspellings.is_empty()
    }

    /// Ids of elements with at least one misspelling
    pub fn flagged_ids(&self) -> HashSet<String> {
        self.misspellings.iter().map(|m| m.node_id.clone()).collect()
    }
}

/// Check every extracted word against `lexicon`.
///
/// A word passes if it is known as a whole or if each of its camelCase
/// parts is known. Hyphenated words are already split by extraction.
pub fn check_spelling(tree: &DocumentTree, lexicon: &impl Lexicon) -> SpellReport {
    let fragments = tree.extract_text();
    let mut report = SpellReport {
        words_checked: fragments.len(),
        misspellings: Vec::new(),
    };

    for fragment in fragments {
        if is_known(&fragment.word, lexicon) {
            continue;
        }
        let suggestions = lexicon.suggest(&fragment.word.to_lowercase());
        report.misspellings.push(Misspelling {
            node_id: fragment.node_id,
            word: fragment.word,
            index: fragment.index,
            suggestions,
        });
    }
    report
}

fn is_known(word: &str, lexicon: &impl Lexicon) -> bool {
    if lexicon.contains(&word.to_lowercase()) {
        return true;
    }
    let parts = split_camel_case(word);
    parts.len() > 1 && parts.iter().all(|part| lexicon.contains(&part.to_lowercase()))
}

/// `camelCaseWord` → `["camel", "Case", "Word"]`
fn split_camel_case(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_lower = false;

    for (i, c) in word.char_indices() {
        if c.is_uppercase() && prev_lower {
            parts.push(&word[start..i]);
            start = i;
        }
        prev_lower = c.is_lowercase();
    }
    parts.push(&word[start..]);
    parts
}
