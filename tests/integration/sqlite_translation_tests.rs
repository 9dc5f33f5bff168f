/*!
 * Integration tests for translated reads backed by the SQLite store
 */

use anyhow::Result;

use mothertongue::context::{RequestContext, User};
use mothertongue::database::StoredTranslation;
use mothertongue::errors::{LookupError, TranslationError};
use mothertongue::translation::{FieldValue, TranslatingRecord};

use crate::common::{
    POST_TRANSLATIONS, create_file_repository, create_temp_dir, field_map, post_model,
    seed_hello_post,
};

#[test]
fn test_helloPost_shouldReadInTheRequestLanguage() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;
    let model = post_model();

    let spanish = RequestContext::new(User::anonymous()).with_language("es");
    let french = RequestContext::new(User::anonymous()).with_language("fr");

    let record = repo.get_record(&model, "1")?.expect("post 1 should exist");
    let post = TranslatingRecord::new(record, repo.related(&model.translation_set, "1"), Some(&spanish))?;

    assert_eq!(post.get("content", &spanish)?, FieldValue::from("Hola"));
    assert_eq!(post.get("content", &french)?, FieldValue::from("Hello"));
    assert_eq!(post.get("slug", &spanish)?, FieldValue::from("hello"));
    Ok(())
}

#[test]
fn test_helloPost_asStaffInAdmin_shouldReadBaseValues() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;

    let context = RequestContext::new(User::staff("editor"))
        .with_path("/admin/blog/post/1/change/")
        .with_language("es");

    let record = repo.get_record(&post_model(), "1")?.expect("post 1 should exist");
    let post = TranslatingRecord::new(record, repo.related(POST_TRANSLATIONS, "1"), Some(&context))?;

    assert_eq!(post.get("content", &context)?, FieldValue::from("Hello"));
    assert_eq!(repo.lookup_count(), 0);
    Ok(())
}

#[test]
fn test_repeatedReads_shouldQueryTheStoreOncePerLanguage() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;

    let record = repo.get_record(&post_model(), "1")?.expect("post 1 should exist");
    let translations = repo.translation_set(&record);
    let post = TranslatingRecord::new(record, translations, Some(&RequestContext::default()))?;

    for _ in 0..3 {
        assert_eq!(post.get_translated("content", "es")?, FieldValue::from("Hola"));
        assert_eq!(post.get_translated("title", "es")?, FieldValue::from("Greeting"));
        assert_eq!(post.get_translated("content", "fr")?, FieldValue::from("Hello"));
    }

    assert_eq!(repo.lookup_count(), 2);
    Ok(())
}

#[test]
fn test_translationAddedAfterAbsentRead_shouldStayHiddenForThatInstance() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;

    let record = repo.get_record(&post_model(), "1")?.expect("post 1 should exist");
    let translations = repo.translation_set(&record);
    let post = TranslatingRecord::new(record, translations, Some(&RequestContext::default()))?;

    assert_eq!(post.get_translated("content", "fr")?, FieldValue::from("Hello"));

    repo.add_translation(&StoredTranslation::new(
        POST_TRANSLATIONS,
        "1",
        "fr",
        field_map(&[("content", "Bonjour")]),
    ))?;

    // The cached absence is kept for the life of the instance
    assert_eq!(post.get_translated("content", "fr")?, FieldValue::from("Hello"));

    let record = repo.get_record(&post_model(), "1")?.expect("post 1 should exist");
    let translations = repo.translation_set(&record);
    let fresh = TranslatingRecord::new(record, translations, Some(&RequestContext::default()))?;
    assert_eq!(fresh.get_translated("content", "fr")?, FieldValue::from("Bonjour"));
    Ok(())
}

#[test]
fn test_duplicateLanguageTranslations_shouldSurfaceAmbiguityOnce() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;
    repo.add_translation(&StoredTranslation::new(
        POST_TRANSLATIONS,
        "1",
        "es",
        field_map(&[("content", "Buenas")]),
    ))?;

    let record = repo.get_record(&post_model(), "1")?.expect("post 1 should exist");
    let translations = repo.translation_set(&record);
    let post = TranslatingRecord::new(record, translations, Some(&RequestContext::default()))?;

    let result = post.get_translated("content", "es");
    assert!(matches!(
        result,
        Err(TranslationError::Lookup(LookupError::MultipleObjectsReturned { count: 2, .. }))
    ));
    assert!(post.is_cached("es"));

    // The ambiguous language now reads as untranslated without another query
    assert_eq!(post.get_translated("content", "es")?, FieldValue::from("Hello"));
    assert_eq!(repo.lookup_count(), 1);
    Ok(())
}

#[test]
fn test_acceptLanguageContext_shouldReadNegotiatedLanguage() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;

    let supported = vec!["en".to_string(), "es".to_string()];
    let context =
        RequestContext::from_accept_language(User::named("visitor"), "fr, es-MX;q=0.8", &supported, "en");
    assert_eq!(context.language(), "es");

    let record = repo.get_record(&post_model(), "1")?.expect("post 1 should exist");
    let translations = repo.translation_set(&record);
    let post = TranslatingRecord::new(record, translations, Some(&context))?;

    assert_eq!(post.get("content", &context)?, FieldValue::from("Hola"));
    Ok(())
}

#[test]
fn test_translationsOfOtherRecords_shouldNotLeak() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;
    repo.save_record("post", "2", &field_map(&[("content", "Goodbye")]))?;

    let record = repo.get_record(&post_model(), "2")?.expect("post 2 should exist");
    let translations = repo.translation_set(&record);
    let post = TranslatingRecord::new(record, translations, Some(&RequestContext::default()))?;

    assert_eq!(post.get_translated("content", "es")?, FieldValue::from("Goodbye"));
    assert_eq!(repo.list_translations(POST_TRANSLATIONS, "2")?.len(), 0);
    Ok(())
}

#[test]
fn test_deletedRecord_shouldTakeItsTranslationsAlong() -> Result<()> {
    let dir = create_temp_dir()?;
    let repo = create_file_repository(&dir)?;
    seed_hello_post(&repo)?;
    let model = post_model();

    assert!(repo.delete_record(&model, "1")?);
    assert!(repo.get_record(&model, "1")?.is_none());
    assert!(repo.list_translations(POST_TRANSLATIONS, "1")?.is_empty());

    // A record saved again under the same ID starts untranslated
    repo.save_record("post", "1", &field_map(&[("content", "Hello")]))?;
    let record = repo.get_record(&model, "1")?.expect("post 1 should exist");
    let translations = repo.translation_set(&record);
    let post = TranslatingRecord::new(record, translations, Some(&RequestContext::default()))?;
    assert_eq!(post.get_translated("content", "es")?, FieldValue::from("Hello"));
    Ok(())
}
