/*!
 * Error types for the mothertongue library.
 *
 * This module contains custom error types for the translated read path and
 * the storage layer, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised when querying a related translation collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No translation exists for the requested language
    #[error("No '{relation}' translation exists for language '{language}'")]
    DoesNotExist {
        /// Name of the related collection
        relation: String,
        /// Language code that was queried
        language: String,
    },

    /// More than one translation matched the requested language
    #[error("{count} '{relation}' translations returned for language '{language}', expected one")]
    MultipleObjectsReturned {
        /// Name of the related collection
        relation: String,
        /// Language code that was queried
        language: String,
        /// Number of matching translations
        count: usize,
    },

    /// The backing store failed
    #[error("Database error: {0}")]
    Database(String),
}

impl LookupError {
    /// Whether this error means "no translation for that language"
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::DoesNotExist { .. })
    }
}

/// Errors raised when reading a field from a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The record has no field with that name
    #[error("No such field: {field}")]
    NoSuchField {
        /// Requested field name
        field: String,
    },
}

impl FieldError {
    pub fn no_such_field(field: &str) -> Self {
        Self::NoSuchField {
            field: field.to_string(),
        }
    }
}

/// Errors raised when the caller context is missing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No request context was supplied when constructing a record
    #[error("No request context available")]
    Unavailable,
}

/// Errors that can occur on the translated read path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// Error from a translation lookup
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Error reading a field
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Error with the request context
    #[error("Context error: {0}")]
    Context(#[from] ContextError),
}

impl From<rusqlite::Error> for LookupError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database(error.to_string())
    }
}
