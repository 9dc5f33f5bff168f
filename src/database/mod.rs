/*!
 * Database module for persistent storage of records and translations.
 *
 * This module provides SQLite-based persistence for:
 * - Base records and their field values
 * - Per-language translation records, read through `TranslationSet`
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{StoredRecord, StoredTranslation};
pub use repository::{RelatedTranslations, Repository};
