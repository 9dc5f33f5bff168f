/*!
 * Database entity models.
 *
 * These structures map directly to database tables and implement the
 * record contracts so stored rows can be read through `TranslatingRecord`.
 */

use serde::{Deserialize, Serialize};

use crate::app_config::ModelConfig;
use crate::errors::FieldError;
use crate::translation::{FieldMap, FieldValue, Record, Translatable, TranslationRecord};

/// A stored base record together with its model's translation declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Database ID
    pub id: i64,
    /// Model name
    pub model: String,
    /// Record identifier within the model
    pub record_id: String,
    /// Field values
    pub fields: FieldMap,
    /// Fields eligible for translation
    pub translated_fields: Vec<String>,
    /// Related collection holding the translations
    pub translation_set: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl StoredRecord {
    /// Create a new record for `model`, not yet persisted
    pub fn new(model: &ModelConfig, record_id: &str, fields: FieldMap) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0, // Will be assigned by database
            model: model.name.clone(),
            record_id: record_id.to_string(),
            fields,
            translated_fields: model.translated_fields.clone(),
            translation_set: model.translation_set.clone(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Record for StoredRecord {
    fn field(&self, name: &str) -> Result<FieldValue, FieldError> {
        self.fields.field(name)
    }
}

impl Translatable for StoredRecord {
    fn translated_fields(&self) -> &[String] {
        &self.translated_fields
    }

    fn translation_set(&self) -> &str {
        &self.translation_set
    }
}

/// A stored translation row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTranslation {
    /// Database ID
    pub id: i64,
    /// Related collection name
    pub relation: String,
    /// Identifier of the base record
    pub record_id: String,
    /// Language code
    pub language: String,
    /// Translated field values
    pub fields: FieldMap,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl StoredTranslation {
    /// Create a new translation, not yet persisted
    pub fn new(relation: &str, record_id: &str, language: &str, fields: FieldMap) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0, // Will be assigned by database
            relation: relation.to_string(),
            record_id: record_id.to_string(),
            language: language.to_string(),
            fields,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Record for StoredTranslation {
    fn field(&self, name: &str) -> Result<FieldValue, FieldError> {
        self.fields.field(name)
    }
}

impl TranslationRecord for StoredTranslation {
    fn language(&self) -> &str {
        &self.language
    }
}
