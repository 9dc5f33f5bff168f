/*!
 * Translated record reads.
 *
 * This module contains the read path that redirects a record's translatable
 * fields to a per-language translation record:
 *
 * - `record`: Contracts implemented by the host data layer
 * - `cache`: Per-record memo of translation lookups
 * - `model`: The `TranslatingRecord` wrapper
 * - `memory`: In-memory translation set
 */

// Re-export main types for easier usage
pub use self::cache::{CacheEntry, TranslationCache};
pub use self::memory::{MemoryTranslation, MemoryTranslationSet};
pub use self::model::TranslatingRecord;
pub use self::record::{FieldMap, FieldValue, Record, Translatable, TranslationRecord, TranslationSet};

// Submodules
pub mod cache;
pub mod memory;
pub mod model;
pub mod record;
