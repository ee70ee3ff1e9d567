use std::collections::{HashMap, HashSet};

/// Generates `<tag>-<n>` ids for elements that were loaded without one.
///
/// Explicit ids are reserved up front so a generated id never collides with
/// an id the document already uses.
#[derive(Debug, Clone, Default)]
pub struct IDGenerator {
    taken: HashSet<String>,
    counts: HashMap<String, u32>,
}

impl IDGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserved<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: ids.into_iter().map(Into::into).collect(),
            counts: HashMap::new(),
        }
    }

    /// Reserve `id`. Returns false if it was already taken.
    pub fn reserve(&mut self, id: &str) -> bool {
        self.taken.insert(id.to_string())
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Generate the next free id for `tag`
    pub fn new_id(&mut self, tag: &str) -> String {
        let count = self.counts.entry(tag.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = format!("{}-{}", tag, count);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_per_tag() {
        let mut gen = IDGenerator::new();
        assert_eq!(gen.new_id("p"), "p-1");
        assert_eq!(gen.new_id("p"), "p-2");
        assert_eq!(gen.new_id("div"), "div-1");
    }

    #[test]
    fn test_skips_reserved_ids() {
        let mut gen = IDGenerator::with_reserved(["p-1", "p-2"]);
        assert_eq!(gen.new_id("p"), "p-3");
        assert!(gen.is_taken("p-3"));
        assert!(!gen.reserve("p-3"));
    }
}
