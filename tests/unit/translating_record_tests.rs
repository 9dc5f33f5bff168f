/*!
 * Tests for reads through TranslatingRecord with an in-memory translation set
 */

use mothertongue::context::{RequestContext, User};
use mothertongue::errors::{ContextError, TranslationError};
use mothertongue::translation::{
    FieldValue, MemoryTranslation, MemoryTranslationSet, TranslatingRecord,
};

use crate::common::{Article, init_test_logger};

fn translations() -> MemoryTranslationSet {
    MemoryTranslationSet::new("articletranslation_set")
        .with(MemoryTranslation::new("es").with_field("content", "Hola"))
        .with(
            MemoryTranslation::new("de")
                .with_field("content", "Hallo")
                .with_field("title", "Gruß"),
        )
}

fn visitor() -> RequestContext {
    RequestContext::new(User::named("visitor")).with_path("/articles/hello/")
}

fn admin_editor() -> RequestContext {
    RequestContext::new(User::staff("editor")).with_path("/admin/blog/article/1/change/")
}

#[test]
fn test_read_nonTranslatableField_shouldIgnoreLanguage() {
    let set = translations();
    let record = TranslatingRecord::new(Article::new("Hello"), &set, Some(&visitor())).unwrap();

    for language in ["en", "es", "de", "fr"] {
        assert_eq!(record.get_translated("slug", language).unwrap(), FieldValue::from("hello"));
    }
    assert_eq!(set.query_count(), 0);
}

#[test]
fn test_read_withoutMatchingTranslation_shouldReturnBaseValue() {
    let record = TranslatingRecord::new(Article::new("Hello"), translations(), Some(&visitor())).unwrap();

    assert_eq!(record.get_translated("content", "fr").unwrap(), FieldValue::from("Hello"));
    assert_eq!(record.get_translated("content", "en").unwrap(), FieldValue::from("Hello"));
}

#[test]
fn test_read_withMatchingTranslation_shouldReturnTranslatedValue() {
    let record = TranslatingRecord::new(Article::new("Hello"), translations(), Some(&visitor())).unwrap();

    assert_eq!(record.get_translated("content", "es").unwrap(), FieldValue::from("Hola"));
    assert_eq!(record.get_translated("title", "de").unwrap(), FieldValue::from("Gruß"));
}

#[test]
fn test_read_translationMissingField_shouldFallBackToBase() {
    let article = Article::new("Hello").with_field("title", "Greeting");
    let record = TranslatingRecord::new(article, translations(), Some(&visitor())).unwrap();

    assert_eq!(record.get_translated("title", "es").unwrap(), FieldValue::from("Greeting"));
}

#[test]
fn test_read_repeatedReads_shouldQueryAtMostOncePerLanguage() {
    init_test_logger();
    let set = translations();
    let record = TranslatingRecord::new(Article::new("Hello"), &set, Some(&visitor())).unwrap();

    for _ in 0..5 {
        record.get_translated("content", "es").unwrap();
        record.get_translated("content", "fr").unwrap();
    }

    // One query for "es" (found) and one for "fr" (cached as absent)
    assert_eq!(set.query_count(), 2);
    assert!(record.is_cached("fr"));
}

#[test]
fn test_read_suppressedForAdminStaff_shouldAlwaysReturnBaseValue() {
    let set = translations();
    let ctx = admin_editor().with_language("es");
    let record = TranslatingRecord::new(Article::new("Hello"), &set, Some(&ctx)).unwrap();

    assert!(!record.allows_translation());
    assert_eq!(record.get("content", &ctx).unwrap(), FieldValue::from("Hello"));
    assert_eq!(record.get_translated("content", "de").unwrap(), FieldValue::from("Hello"));
    assert_eq!(record.get_translated("slug", "de").unwrap(), FieldValue::from("hello"));
    assert_eq!(set.query_count(), 0);
}

#[test]
fn test_read_staffOutsideAdmin_shouldTranslate() {
    let ctx = RequestContext::new(User::staff("editor")).with_path("/articles/hello/");
    let record = TranslatingRecord::new(Article::new("Hello"), translations(), Some(&ctx)).unwrap();

    assert!(record.allows_translation());
    assert_eq!(record.get_translated("content", "es").unwrap(), FieldValue::from("Hola"));
}

#[test]
fn test_read_switchingLanguage_shouldServeEachLanguageIndependently() {
    let set = translations();
    let record = TranslatingRecord::new(Article::new("Hello"), &set, Some(&visitor())).unwrap();

    assert_eq!(record.get_translated("content", "en").unwrap(), FieldValue::from("Hello"));
    assert_eq!(record.get_translated("content", "es").unwrap(), FieldValue::from("Hola"));
    assert_eq!(record.get_translated("content", "en").unwrap(), FieldValue::from("Hello"));
    assert_eq!(record.get_translated("content", "de").unwrap(), FieldValue::from("Hallo"));

    assert_eq!(set.query_count(), 3);
    assert_eq!(record.cached_languages(), vec!["de", "en", "es"]);
}

#[test]
fn test_suppression_shouldBeFixedAtConstruction() {
    let ctx = visitor().with_language("es");
    let record = TranslatingRecord::new(Article::new("Hello"), translations(), Some(&ctx)).unwrap();

    // A later admin context does not change the flag of an existing record
    let admin = admin_editor().with_language("es");
    assert!(record.allows_translation());
    assert_eq!(record.get("content", &admin).unwrap(), FieldValue::from("Hola"));
}

#[test]
fn test_cache_shouldNotBeSharedAcrossInstances() {
    let set = translations();
    let first = TranslatingRecord::new(Article::new("Hello"), &set, Some(&visitor())).unwrap();
    let second = TranslatingRecord::new(Article::new("Hello"), &set, Some(&visitor())).unwrap();

    first.get_translated("content", "es").unwrap();
    second.get_translated("content", "es").unwrap();

    assert_eq!(set.query_count(), 2);
}

#[test]
fn test_new_withoutRequestContext_shouldFail() {
    let result = TranslatingRecord::new(Article::new("Hello"), translations(), None);
    assert!(matches!(
        result,
        Err(TranslationError::Context(ContextError::Unavailable))
    ));
}
