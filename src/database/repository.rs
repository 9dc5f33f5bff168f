/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API over stored records and their
 * translations, abstracting away the SQL details. `RelatedTranslations`
 * exposes one record's translations as a `TranslationSet`.
 */

use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::connection::DatabaseConnection;
use super::models::{StoredRecord, StoredTranslation};
use crate::app_config::ModelConfig;
use crate::errors::LookupError;
use crate::translation::{FieldMap, TranslationSet};

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
    /// Translation lookups made through `find_translation`
    lookups: Arc<AtomicUsize>,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Insert a record or replace the fields of an existing one
    pub fn save_record(&self, model: &str, record_id: &str, fields: &FieldMap) -> Result<()> {
        let fields_json = serde_json::to_string(fields).context("Failed to serialize record fields")?;
        let now = chrono::Utc::now().to_rfc3339();

        self.db.execute(|conn| {
            conn.execute(
                r#"
                INSERT INTO records (model, record_id, fields, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?4)
                ON CONFLICT(model, record_id)
                DO UPDATE SET fields = excluded.fields, updated_at = excluded.updated_at
                "#,
                params![model, record_id, fields_json, now],
            )?;
            Ok(())
        })
    }

    /// Get a record by ID, attaching the model's translation declaration
    pub fn get_record(&self, model: &ModelConfig, record_id: &str) -> Result<Option<StoredRecord>> {
        let row = self.db.execute(|conn| {
            Ok(conn
                .query_row(
                    r#"
                    SELECT id, fields, created_at, updated_at
                    FROM records WHERE model = ?1 AND record_id = ?2
                    "#,
                    params![model.name, record_id],
                    |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                )
                .optional()?)
        })?;

        let Some((id, fields_json, created_at, updated_at)) = row else {
            return Ok(None);
        };

        let fields: FieldMap = serde_json::from_str(&fields_json)
            .with_context(|| format!("Corrupt fields for {} '{}'", model.name, record_id))?;

        Ok(Some(StoredRecord {
            id,
            model: model.name.clone(),
            record_id: record_id.to_string(),
            fields,
            translated_fields: model.translated_fields.clone(),
            translation_set: model.translation_set.clone(),
            created_at,
            updated_at,
        }))
    }

    /// Delete a record together with its translations
    pub fn delete_record(&self, model: &ModelConfig, record_id: &str) -> Result<bool> {
        self.db.transaction(|tx| {
            let translations = tx.execute(
                "DELETE FROM translations WHERE relation = ?1 AND record_id = ?2",
                params![model.translation_set, record_id],
            )?;
            let deleted = tx.execute(
                "DELETE FROM records WHERE model = ?1 AND record_id = ?2",
                params![model.name, record_id],
            )?;

            debug!(
                "Deleted {} {} '{}' with {} translation(s)",
                deleted, model.name, record_id, translations
            );
            Ok(deleted > 0)
        })
    }

    // =========================================================================
    // Translation Operations
    // =========================================================================

    /// Store a translation and return its database ID.
    ///
    /// Nothing prevents a second translation for the same language; lookups
    /// report that case as `LookupError::MultipleObjectsReturned`.
    pub fn add_translation(&self, translation: &StoredTranslation) -> Result<i64> {
        let fields_json = serde_json::to_string(&translation.fields)
            .context("Failed to serialize translation fields")?;

        self.db.execute(|conn| {
            conn.execute(
                r#"
                INSERT INTO translations (relation, record_id, language, fields, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    translation.relation,
                    translation.record_id,
                    translation.language,
                    fields_json,
                    translation.created_at,
                    translation.updated_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// List a record's translations ordered by language
    pub fn list_translations(&self, relation: &str, record_id: &str) -> Result<Vec<StoredTranslation>> {
        self.db.execute(|conn| {
            query_translations(
                conn,
                r#"
                SELECT id, relation, record_id, language, fields, created_at, updated_at
                FROM translations
                WHERE relation = ?1 AND record_id = ?2
                ORDER BY language, id
                "#,
                params![relation, record_id],
            )
        })
    }

    /// Delete a translation by database ID
    pub fn delete_translation(&self, id: i64) -> Result<bool> {
        self.db.execute(|conn| {
            let deleted = conn.execute("DELETE FROM translations WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }

    /// Fetch exactly one translation of a record for `language`
    pub fn find_translation(
        &self,
        relation: &str,
        record_id: &str,
        language: &str,
    ) -> Result<StoredTranslation, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let mut matches = self
            .db
            .execute(|conn| {
                query_translations(
                    conn,
                    r#"
                    SELECT id, relation, record_id, language, fields, created_at, updated_at
                    FROM translations
                    WHERE relation = ?1 AND record_id = ?2 AND language = ?3
                    ORDER BY id
                    "#,
                    params![relation, record_id, language],
                )
            })
            .map_err(|e| LookupError::Database(format!("{:#}", e)))?;

        debug!(
            "Found {} '{}' translation(s) of '{}' for '{}'",
            matches.len(),
            relation,
            record_id,
            language
        );

        match matches.len() {
            0 => Err(LookupError::DoesNotExist {
                relation: relation.to_string(),
                language: language.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(LookupError::MultipleObjectsReturned {
                relation: relation.to_string(),
                language: language.to_string(),
                count,
            }),
        }
    }

    /// The translations of `record` as a translation set
    pub fn translation_set(&self, record: &StoredRecord) -> RelatedTranslations<'_> {
        self.related(&record.translation_set, &record.record_id)
    }

    /// The translations of a record under `relation` as a translation set
    pub fn related(&self, relation: &str, record_id: &str) -> RelatedTranslations<'_> {
        RelatedTranslations {
            repo: self,
            relation: relation.to_string(),
            record_id: record_id.to_string(),
        }
    }

    /// Number of translation lookups made through this repository
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

/// Run a translation query and decode its rows
fn query_translations(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<StoredTranslation>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(id, relation, record_id, language, fields_json, created_at, updated_at)| -> Result<StoredTranslation> {
            let fields: FieldMap = serde_json::from_str(&fields_json)
                .with_context(|| format!("Corrupt fields for translation {}", id))?;
            Ok(StoredTranslation {
                id,
                relation,
                record_id,
                language,
                fields,
                created_at,
                updated_at,
            })
        })
        .collect()
}

/// One record's translations, queried on demand
#[derive(Clone)]
pub struct RelatedTranslations<'a> {
    repo: &'a Repository,
    relation: String,
    record_id: String,
}

impl RelatedTranslations<'_> {
    /// All translations of the record
    pub fn all(&self) -> Result<Vec<StoredTranslation>> {
        self.repo.list_translations(&self.relation, &self.record_id)
    }
}

impl TranslationSet for RelatedTranslations<'_> {
    type Translation = StoredTranslation;

    fn relation(&self) -> &str {
        &self.relation
    }

    fn get(&self, language: &str) -> Result<StoredTranslation, LookupError> {
        self.repo.find_translation(&self.relation, &self.record_id, language)
    }
}
