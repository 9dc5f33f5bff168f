/*!
 * # mothertongue - per-language translation overlays for records
 *
 * A Rust library that redirects reads of a record's translatable fields to a
 * related translation record for the caller's active language, falling back
 * to the record's own value when no translation applies.
 *
 * ## Features
 *
 * - Explicit `get_translated(field, language)` accessor on any record
 * - Per-instance cache of translation lookups, including negative results
 * - Admin escape hatch: staff operators editing in the admin see base values
 * - `Accept-Language` negotiation with ISO 639 code normalization
 * - SQLite store for records and translations
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `translation`: The translated read path:
 *   - `translation::record`: Record and translation set contracts
 *   - `translation::cache`: Per-record lookup cache
 *   - `translation::model`: The `TranslatingRecord` wrapper
 *   - `translation::memory`: In-memory translation set
 * - `context`: Request context (caller, path, active language)
 * - `locale`: Language negotiation
 * - `language_utils`: ISO language code utilities
 * - `database`: SQLite persistence of records and translations
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod context;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod locale;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, ModelConfig};
pub use context::{RequestContext, User};
pub use errors::{ContextError, FieldError, LookupError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use translation::{
    FieldValue, Record, Translatable, TranslatingRecord, TranslationRecord, TranslationSet,
};
