//! Reverse index from a path name to the entries relative to it.

use std::collections::{BTreeSet, HashMap, VecDeque};

/// Maps a path name to the names that declare it as their relative-to target.
///
/// Empty dependent sets are pruned, so a name with no dependents has no key.
///
/// # Examples
///
/// ```
/// use pathreg::registry::DependencyIndex;
///
/// let mut index = DependencyIndex::new();
/// index.add("data", "logs");
/// index.add("logs", "archive");
///
/// assert_eq!(index.dependents("data"), vec!["logs"]);
/// assert_eq!(index.transitive_dependents("data"), vec!["logs", "archive"]);
///
/// index.remove("logs", "archive");
/// assert!(!index.has_dependents("logs"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct DependencyIndex {
    dependents: HashMap<String, BTreeSet<String>>,
}

impl DependencyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `dependent` is relative to `target`.
    pub fn add(&mut self, target: &str, dependent: &str) {
        self.dependents
            .entry(target.to_string())
            .or_default()
            .insert(dependent.to_string());
    }

    /// Forget that `dependent` is relative to `target`.
    ///
    /// Returns whether the edge existed.
    pub fn remove(&mut self, target: &str, dependent: &str) -> bool {
        let Some(set) = self.dependents.get_mut(target) else {
            return false;
        };
        let removed = set.remove(dependent);
        if set.is_empty() {
            self.dependents.remove(target);
        }
        removed
    }

    /// Whether any entry is relative to `target`.
    #[must_use]
    pub fn has_dependents(&self, target: &str) -> bool {
        self.dependents.contains_key(target)
    }

    /// Direct dependents of `target`, sorted by name.
    #[must_use]
    pub fn dependents(&self, target: &str) -> Vec<String> {
        self.dependents
            .get(target)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every entry whose resolution passes through `target`.
    ///
    /// Breadth-first: nearer dependents come first, siblings in name order.
    /// `target` itself is never included, even if a cycle leads back to it.
    #[must_use]
    pub fn transitive_dependents(&self, target: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([target.to_string()]);
        seen.insert(target.to_string());

        while let Some(current) = queue.pop_front() {
            let Some(set) = self.dependents.get(&current) else {
                continue;
            };
            for dependent in set {
                if seen.insert(dependent.clone()) {
                    order.push(dependent.clone());
                    queue.push_back(dependent.clone());
                }
            }
        }

        order
    }

    /// Number of names that have at least one dependent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    /// Whether no dependency edges are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_prunes_empty_sets() {
        let mut index = DependencyIndex::new();
        index.add("data", "logs");
        index.add("data", "tmp");
        assert_eq!(index.len(), 1);

        assert!(index.remove("data", "logs"));
        assert!(index.has_dependents("data"));
        assert!(index.remove("data", "tmp"));
        assert!(!index.has_dependents("data"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_missing_edge() {
        let mut index = DependencyIndex::new();
        assert!(!index.remove("data", "logs"));
        index.add("data", "logs");
        assert!(!index.remove("data", "other"));
        assert!(index.has_dependents("data"));
    }

    #[test]
    fn test_dependents_sorted() {
        let mut index = DependencyIndex::new();
        index.add("data", "zeta");
        index.add("data", "alpha");
        index.add("data", "mid");
        assert_eq!(index.dependents("data"), vec!["alpha", "mid", "zeta"]);
        assert!(index.dependents("none").is_empty());
    }

    #[test]
    fn test_transitive_breadth_first() {
        let mut index = DependencyIndex::new();
        index.add("root", "b");
        index.add("root", "a");
        index.add("a", "a1");
        index.add("b", "b1");
        index.add("a1", "deep");

        assert_eq!(
            index.transitive_dependents("root"),
            vec!["a", "b", "a1", "b1", "deep"]
        );
        assert_eq!(index.transitive_dependents("a"), vec!["a1", "deep"]);
        assert!(index.transitive_dependents("deep").is_empty());
    }

    #[test]
    fn test_transitive_terminates_on_cycle() {
        let mut index = DependencyIndex::new();
        index.add("a", "b");
        index.add("b", "a");
        assert_eq!(index.transitive_dependents("a"), vec!["b"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Adding then removing every edge leaves no keys behind
            #[test]
            fn add_remove_leaves_index_empty(
                edges in prop::collection::vec(("[a-e]", "[f-j]"), 0..30)
            ) {
                let mut index = DependencyIndex::new();
                for (target, dependent) in &edges {
                    index.add(target, dependent);
                }
                for (target, dependent) in &edges {
                    index.remove(target, dependent);
                }
                prop_assert!(index.is_empty());
            }
        }
    }
}
