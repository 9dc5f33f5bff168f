/*!
 * In-memory translation set.
 *
 * Holds translations in a vector and counts the queries made against it.
 * Useful for hosts that load translations eagerly and for tests.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{FieldError, LookupError};

use super::record::{FieldMap, FieldValue, Record, TranslationRecord, TranslationSet};

/// A translation held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTranslation {
    /// Language code of the translation
    pub language: String,
    /// Translated field values
    pub fields: FieldMap,
}

impl MemoryTranslation {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            fields: FieldMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

impl Record for MemoryTranslation {
    fn field(&self, name: &str) -> Result<FieldValue, FieldError> {
        self.fields.field(name)
    }
}

impl TranslationRecord for MemoryTranslation {
    fn language(&self) -> &str {
        &self.language
    }
}

/// Translation set backed by a vector
#[derive(Debug, Default)]
pub struct MemoryTranslationSet {
    relation: String,
    translations: Vec<MemoryTranslation>,
    queries: AtomicUsize,
}

impl MemoryTranslationSet {
    pub fn new(relation: &str) -> Self {
        Self {
            relation: relation.to_string(),
            translations: Vec::new(),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, translation: MemoryTranslation) -> Self {
        self.translations.push(translation);
        self
    }

    /// Number of `get` calls made so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl TranslationSet for MemoryTranslationSet {
    type Translation = MemoryTranslation;

    fn relation(&self) -> &str {
        &self.relation
    }

    fn get(&self, language: &str) -> Result<MemoryTranslation, LookupError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let mut matches = self.translations.iter().filter(|t| t.language == language);
        let first = matches.next().ok_or_else(|| LookupError::DoesNotExist {
            relation: self.relation.clone(),
            language: language.to_string(),
        })?;

        let extra = matches.count();
        if extra > 0 {
            return Err(LookupError::MultipleObjectsReturned {
                relation: self.relation.clone(),
                language: language.to_string(),
                count: extra + 1,
            });
        }

        Ok(first.clone())
    }
}
