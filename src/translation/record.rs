/*!
 * Record contracts for the translated read path.
 *
 * A host data layer implements these traits for its base records, its
 * translation records and the related collection that links them.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{FieldError, LookupError};

/// A dynamically typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing or SQL NULL
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Borrow the value as text, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, ""),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Named field values of a record
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Anything whose fields can be read by name
pub trait Record {
    /// Read a field, failing with `FieldError::NoSuchField` when absent
    fn field(&self, name: &str) -> Result<FieldValue, FieldError>;
}

impl Record for FieldMap {
    fn field(&self, name: &str) -> Result<FieldValue, FieldError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| FieldError::no_such_field(name))
    }
}

/// A base record that declares which of its fields may be translated
pub trait Translatable: Record {
    /// Names of the fields eligible for translation
    fn translated_fields(&self) -> &[String];

    /// Name of the related collection holding this record's translations
    fn translation_set(&self) -> &str;

    fn is_translated_field(&self, name: &str) -> bool {
        self.translated_fields().iter().any(|field| field == name)
    }
}

/// A record carrying field values for one language
pub trait TranslationRecord: Record {
    fn language(&self) -> &str;
}

/// The related collection of translations for one base record
pub trait TranslationSet {
    type Translation: TranslationRecord;

    /// Name of the collection, used in errors and logs
    fn relation(&self) -> &str;

    /// Fetch exactly one translation for `language`.
    ///
    /// Returns `LookupError::DoesNotExist` when there is none and
    /// `LookupError::MultipleObjectsReturned` when the language is ambiguous.
    fn get(&self, language: &str) -> Result<Self::Translation, LookupError>;
}

impl<T: TranslationSet + ?Sized> TranslationSet for &T {
    type Translation = T::Translation;

    fn relation(&self) -> &str {
        (**self).relation()
    }

    fn get(&self, language: &str) -> Result<Self::Translation, LookupError> {
        (**self).get(language)
    }
}
