/*!
 * Translating record wrapper.
 *
 * `TranslatingRecord` pairs a base record with its related translation set
 * and serves translatable fields from the translation for the requested
 * language, falling back to the base value when no translation applies.
 */

use log::debug;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::errors::{ContextError, FieldError, LookupError, TranslationError};

use super::cache::{CacheEntry, TranslationCache};
use super::record::{FieldValue, Record, Translatable, TranslationSet};

/// A base record whose translatable fields are read through its translations
pub struct TranslatingRecord<R, S>
where
    R: Translatable,
    S: TranslationSet,
{
    /// The wrapped base record
    record: R,

    /// Related collection of translations
    translations: S,

    /// Lookups already made by this instance
    cache: Mutex<TranslationCache<Arc<S::Translation>>>,

    /// Fixed at construction; false for staff operators in the admin
    allow_translate: bool,
}

impl<R, S> TranslatingRecord<R, S>
where
    R: Translatable,
    S: TranslationSet,
{
    /// Wrap `record` for the request described by `context`.
    ///
    /// Whether translation is allowed is decided here once and never
    /// recomputed. Fails with `ContextError::Unavailable` when there is no
    /// request context.
    pub fn new(
        record: R,
        translations: S,
        context: Option<&RequestContext>,
    ) -> Result<Self, TranslationError> {
        let context = context.ok_or(ContextError::Unavailable)?;
        let allow_translate = !context.suppresses_translation();

        if !allow_translate {
            debug!(
                "Translation disabled for '{}': staff request on admin path",
                translations.relation()
            );
        }

        Ok(Self {
            record,
            translations,
            cache: Mutex::new(TranslationCache::new()),
            allow_translate,
        })
    }

    /// Whether reads may be redirected to translations
    pub fn allows_translation(&self) -> bool {
        self.allow_translate
    }

    /// The wrapped base record
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Read `name` in the request's active language
    pub fn get(&self, name: &str, context: &RequestContext) -> Result<FieldValue, TranslationError> {
        self.get_translated(name, context.language())
    }

    /// Read `name` as seen in `language`.
    ///
    /// Translatable fields come from the translation for `language` when one
    /// exists and carries the field; everything else is the base value.
    pub fn get_translated(&self, name: &str, language: &str) -> Result<FieldValue, TranslationError> {
        if !self.allow_translate || !self.record.is_translated_field(name) {
            return Ok(self.record.field(name)?);
        }

        if let Some(translation) = self.translation_for(language)? {
            match translation.field(name) {
                Ok(value) => return Ok(value),
                Err(FieldError::NoSuchField { .. }) => {
                    debug!(
                        "'{}' translation for '{}' has no field '{}'",
                        self.translations.relation(),
                        language,
                        name
                    );
                }
            }
        }

        Ok(self.record.field(name)?)
    }

    /// The translation for `language`, querying the related set at most once.
    ///
    /// A missing translation is cached as such. Any other lookup failure is
    /// returned once and then cached as a missing translation.
    pub fn translation_for(&self, language: &str) -> Result<Option<Arc<S::Translation>>, LookupError> {
        let mut cache = self.cache.lock();

        match cache.lookup(language) {
            CacheEntry::Found(translation) => return Ok(Some(Arc::clone(translation))),
            CacheEntry::NotFound => return Ok(None),
            CacheEntry::NotQueried => {}
        }

        match self.translations.get(language) {
            Ok(translation) => {
                let translation = Arc::new(translation);
                cache.insert_found(language, Arc::clone(&translation));
                Ok(Some(translation))
            }
            Err(error) if error.is_absent() => {
                debug!("{}", error);
                cache.insert_not_found(language);
                Ok(None)
            }
            Err(error) => {
                // Later reads fall back to the base value without querying again
                cache.insert_not_found(language);
                Err(error)
            }
        }
    }

    /// Languages this instance has looked up, sorted
    pub fn cached_languages(&self) -> Vec<String> {
        self.cache
            .lock()
            .languages()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Cache state for `language` without querying
    pub fn is_cached(&self, language: &str) -> bool {
        self.cache.lock().contains(language)
    }

    /// Cache statistics as (hits, misses, hit rate)
    pub fn cache_stats(&self) -> (usize, usize, f64) {
        self.cache.lock().stats()
    }
}

impl<R, S> fmt::Debug for TranslatingRecord<R, S>
where
    R: Translatable,
    S: TranslationSet,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatingRecord")
            .field("translation_set", &self.record.translation_set())
            .field("translated_fields", &self.record.translated_fields())
            .field("allow_translate", &self.allow_translate)
            .field("cached_languages", &self.cached_languages())
            .finish()
    }
}
