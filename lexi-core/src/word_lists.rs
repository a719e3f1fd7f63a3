use lexi_types::FavoriteList;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Order in which the words were added
    #[default]
    DateCreated,
    Alphabetical,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dateCreated" => Some(SortOrder::DateCreated),
            "alphabetical" => Some(SortOrder::Alphabetical),
            _ => None,
        }
    }
}

/// Editing helpers for favorite word lists
pub trait WordListEditor {
    fn add_word(&mut self, word: &str) -> bool;
    fn replace_words(&mut self, words: &[String]);
    fn remove_word(&mut self, word: &str) -> bool;
    fn filter_words(&self, term: &str) -> Vec<&str>;
    fn sorted_words(&self, term: &str, order: SortOrder) -> Vec<&str>;
}

/// New, unsaved list with both timestamps set to now
pub fn new_favorite_list(name: &str) -> FavoriteList {
    let now = chrono::Utc::now().to_rfc3339();
    FavoriteList {
        id: None,
        name: name.trim().to_string(),
        words: Vec::new(),
        notes: String::new(),
        date_created: now.clone(),
        last_modified: now,
    }
}

impl WordListEditor for FavoriteList {
    /// Blank words are ignored
    fn add_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.push(word.to_string());
        self.last_modified = chrono::Utc::now().to_rfc3339();
        true
    }

    /// Replace the whole list, applying the same rules as `add_word`
    fn replace_words(&mut self, words: &[String]) {
        self.words.clear();
        for word in words {
            self.add_word(word);
        }
        self.last_modified = chrono::Utc::now().to_rfc3339();
    }

    fn remove_word(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w != word);
        if self.words.len() == before {
            return false;
        }
        self.last_modified = chrono::Utc::now().to_rfc3339();
        true
    }

    fn filter_words(&self, term: &str) -> Vec<&str> {
        let term = term.to_lowercase();
        self.words
            .iter()
            .filter(|word| word.to_lowercase().contains(&term))
            .map(String::as_str)
            .collect()
    }

    fn sorted_words(&self, term: &str, order: SortOrder) -> Vec<&str> {
        let mut words = self.filter_words(term);
        if order == SortOrder::Alphabetical {
            words.sort_by_key(|word| word.to_lowercase());
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> FavoriteList {
        let mut list = new_favorite_list("  Poetic words ");
        for word in ["Luminous", "ethereal", "mellifluous", "Eloquent"] {
            list.add_word(word);
        }
        list
    }

    #[test]
    fn test_new_list() {
        let list = new_favorite_list("  Poetic words ");
        assert_eq!(list.name, "Poetic words");
        assert!(list.words.is_empty());
        assert_eq!(list.date_created, list.last_modified);
        assert!(list.id.is_none());
    }

    #[test]
    fn test_blank_words_are_ignored() {
        let mut list = sample_list();
        assert!(!list.add_word("   "));
        assert!(list.add_word("  resilient "));
        assert_eq!(list.words.last().map(String::as_str), Some("resilient"));
        assert_eq!(list.words.len(), 5);
    }

    #[test]
    fn test_replace_words_drops_blanks() {
        let mut list = sample_list();
        let words = vec!["".to_string(), " ember ".to_string(), "   ".to_string(), "ash".to_string()];
        list.replace_words(&words);
        assert_eq!(list.words, vec!["ember", "ash"]);
    }

    #[test]
    fn test_remove_word() {
        let mut list = sample_list();
        assert!(list.remove_word("ethereal"));
        assert!(!list.remove_word("ethereal"));
        assert_eq!(list.words.len(), 3);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let list = sample_list();
        assert_eq!(list.filter_words("LU"), vec!["Luminous", "mellifluous"]);
        assert_eq!(list.filter_words(""), vec!["Luminous", "ethereal", "mellifluous", "Eloquent"]);
    }

    #[test]
    fn test_sorted_words() {
        let list = sample_list();
        assert_eq!(
            list.sorted_words("", SortOrder::Alphabetical),
            vec!["Eloquent", "ethereal", "Luminous", "mellifluous"]
        );
        assert_eq!(
            list.sorted_words("e", SortOrder::DateCreated),
            vec!["ethereal", "mellifluous", "Eloquent"]
        );
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("alphabetical"), Some(SortOrder::Alphabetical));
        assert_eq!(SortOrder::parse("dateCreated"), Some(SortOrder::DateCreated));
        assert_eq!(SortOrder::parse("random"), None);
    }
}
