/*!
 * Per-record translation cache.
 *
 * Memoizes related-collection lookups by language code so a record queries
 * its translations at most once per language, including lookups that found
 * nothing.
 */

use log::debug;
use std::collections::HashMap;

/// State of one language code in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry<T> {
    /// The related collection was never queried for this code
    NotQueried,
    /// A translation was found and cached
    Found(T),
    /// The query ran and found no translation
    NotFound,
}

/// Lookup memo keyed by language code
#[derive(Debug, Clone)]
pub struct TranslationCache<T> {
    /// Queried codes and their outcome
    entries: HashMap<String, CacheEntry<T>>,

    /// Cache hit counter
    hits: usize,

    /// Cache miss counter
    misses: usize,
}

impl<T> TranslationCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a language code, counting the hit or miss
    pub fn lookup(&mut self, language: &str) -> CacheEntry<&T> {
        match self.entries.get(language) {
            Some(entry) => {
                self.hits += 1;
                debug!("Translation cache hit for '{}'", language);
                match entry {
                    CacheEntry::Found(value) => CacheEntry::Found(value),
                    CacheEntry::NotFound => CacheEntry::NotFound,
                    CacheEntry::NotQueried => CacheEntry::NotQueried,
                }
            }
            None => {
                self.misses += 1;
                debug!("Translation cache miss for '{}'", language);
                CacheEntry::NotQueried
            }
        }
    }

    /// Record a translation found for `language`
    pub fn insert_found(&mut self, language: &str, value: T) {
        self.entries
            .insert(language.to_string(), CacheEntry::Found(value));
    }

    /// Record that `language` has no translation
    pub fn insert_not_found(&mut self, language: &str) {
        self.entries
            .insert(language.to_string(), CacheEntry::NotFound);
    }

    pub fn contains(&self, language: &str) -> bool {
        self.entries.contains_key(language)
    }

    /// Languages queried so far, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let total = self.hits + self.misses;

        let hit_rate = if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        };

        (self.hits, self.misses, hit_rate)
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TranslationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
