use serde::{Deserialize, Serialize};

/// Most searches remembered
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Recent search terms, most recent first, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches(Vec<String>);

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored terms, enforcing the bound and uniqueness
    pub fn from_terms(terms: Vec<String>) -> Self {
        let mut searches = Self::new();
        for term in terms.into_iter().rev() {
            searches.record(&term);
        }
        searches
    }

    /// Move `term` to the front; blank terms are ignored
    ///
    /// Returns whether the list changed.
    pub fn record(&mut self, term: &str) -> bool {
        if term.trim().is_empty() {
            return false;
        }
        let before = self.0.clone();
        self.0.retain(|existing| existing != term);
        self.0.insert(0, term.to_string());
        self.0.truncate(MAX_RECENT_SEARCHES);
        self.0 != before
    }

    pub fn remove(&mut self, term: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != term);
        self.0.len() != before
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_five_most_recent_without_duplicates() {
        let mut searches = RecentSearches::new();
        for term in ["a", "b", "c", "a", "d", "e", "f"] {
            searches.record(term);
        }
        assert_eq!(searches.terms(), ["f", "e", "d", "a", "c"]);
    }

    #[test]
    fn blank_terms_are_ignored() {
        let mut searches = RecentSearches::new();
        assert!(!searches.record("   "));
        assert!(searches.terms().is_empty());
    }

    #[test]
    fn stored_terms_are_normalized() {
        let stored = vec!["x", "y", "x", "1", "2", "3", "4"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let searches = RecentSearches::from_terms(stored);
        assert_eq!(searches.terms(), ["x", "y", "1", "2", "3"]);
    }

    #[test]
    fn remove_drops_a_single_term() {
        let mut searches = RecentSearches::from_terms(vec!["x".to_string(), "y".to_string()]);
        assert!(searches.remove("x"));
        assert!(!searches.remove("x"));
        assert_eq!(searches.terms(), ["y"]);
    }
}
