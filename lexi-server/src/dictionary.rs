use lexi_core::{FEATURED_WORDS, RandomSource, WordPool, choose};
use lexi_types::WordEntry;
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("No results found. Please try another word.")]
    NotFound,
}

/// Client for the public dictionary API (`GET {base}/{word}`)
pub struct DictionaryClient {
    client: Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Entries for `word`. Network failures, error statuses and unknown
    /// words all come back as `NotFound`.
    pub async fn lookup(&self, word: &str) -> Result<Vec<WordEntry>, DictionaryError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(DictionaryError::NotFound);
        }

        let url = format!("{}/{}", self.base_url, word);
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Dictionary lookup for '{}' failed: {}", word, e);
            DictionaryError::NotFound
        })?;

        if !response.status().is_success() {
            tracing::debug!("Dictionary returned {} for '{}'", response.status(), word);
            return Err(DictionaryError::NotFound);
        }

        let entries: Vec<WordEntry> = response.json().await.map_err(|e| {
            tracing::warn!("Malformed dictionary response for '{}': {}", word, e);
            DictionaryError::NotFound
        })?;

        if entries.is_empty() {
            return Err(DictionaryError::NotFound);
        }
        Ok(entries)
    }

    /// Look up a randomly picked featured word
    pub async fn word_of_the_day(
        &self,
        rng: &mut impl RandomSource,
    ) -> Result<WordEntry, DictionaryError> {
        let word = choose(FEATURED_WORDS, rng).ok_or(DictionaryError::NotFound)?;
        let mut entries = self.lookup(word).await?;
        Ok(entries.swap_remove(0))
    }

    /// A word confirmed by the live dictionary, or a pool word when the
    /// dictionary cannot be reached
    pub async fn random_word(&self, pool: &WordPool, rng: &mut impl RandomSource) -> Option<String> {
        let candidate = pool.random_word(rng).ok()?.to_string();
        match self.lookup(&candidate).await {
            Ok(mut entries) => {
                let word = entries.swap_remove(0).word.to_lowercase();
                if lexi_core::is_alphabetic(&word) {
                    Some(word)
                } else {
                    Some(candidate)
                }
            }
            Err(_) => {
                tracing::debug!("Falling back to static word '{}'", candidate);
                Some(candidate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_core::SequenceSource;

    fn offline_client() -> DictionaryClient {
        DictionaryClient::new("http://127.0.0.1:9/api/v2/entries/en/")
    }

    #[tokio::test]
    async fn test_unreachable_dictionary_is_not_found() {
        let client = offline_client();
        assert!(matches!(
            client.lookup("luminous").await,
            Err(DictionaryError::NotFound)
        ));
        assert!(matches!(client.lookup("   ").await, Err(DictionaryError::NotFound)));
    }

    #[tokio::test]
    async fn test_random_word_falls_back_to_pool() {
        let client = offline_client();
        let pool = WordPool::from_words(["cherry"]);

        let word = client
            .random_word(&pool, &mut SequenceSource::zeros())
            .await;
        assert_eq!(word.as_deref(), Some("cherry"));

        let empty = WordPool::from_word_list("");
        assert!(client
            .random_word(&empty, &mut SequenceSource::zeros())
            .await
            .is_none());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            DictionaryError::NotFound.to_string(),
            "No results found. Please try another word."
        );
    }
}
