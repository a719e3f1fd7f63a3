/// Number of searches remembered per user
pub const RECENT_SEARCH_LIMIT: usize = 5;

/// Most-recent-first search terms without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    terms: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `term` to the front, dropping the oldest entry past the limit
    pub fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.terms.retain(|existing| existing != term);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(RECENT_SEARCH_LIMIT);
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Words a user starred while browsing the dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    words: Vec<String>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the word if missing, remove it otherwise. Returns whether the word
    /// is bookmarked afterwards.
    pub fn toggle(&mut self, word: &str) -> bool {
        if let Some(index) = self.words.iter().position(|w| w == word) {
            self.words.remove(index);
            false
        } else {
            self.words.push(word.to_string());
            true
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_searches_are_capped_and_deduplicated() {
        let mut recent = RecentSearches::new();
        for term in ["one", "two", "three", "four", "five", "six"] {
            recent.record(term);
        }
        assert_eq!(recent.terms(), &["six", "five", "four", "three", "two"]);

        recent.record("four");
        assert_eq!(recent.terms(), &["four", "six", "five", "three", "two"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let mut recent = RecentSearches::new();
        recent.record("  ");
        recent.record(" luminous ");
        assert_eq!(recent.terms(), &["luminous"]);
    }

    #[test]
    fn test_bookmark_toggle_twice_restores() {
        let mut bookmarks = Bookmarks::new();
        bookmarks.toggle("ethereal");

        assert!(bookmarks.toggle("eloquent"));
        assert!(bookmarks.contains("eloquent"));
        assert!(!bookmarks.toggle("eloquent"));
        assert!(!bookmarks.contains("eloquent"));

        assert_eq!(bookmarks.words(), &["ethereal"]);
    }
}
