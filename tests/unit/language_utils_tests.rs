/*!
 * Tests for language utility functions
 */

use mothertongue::language_utils::{
    LanguageCodeType, get_language_name, language_codes_match, normalize_to_part1_or_part2t,
    normalize_to_part2t, primary_subtag, validate_language_code,
};
use mothertongue::locale::negotiate_language;

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    // ISO 639-1 tests
    assert!(matches!(validate_language_code("en").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("es").unwrap(), LanguageCodeType::Part1));

    // ISO 639-2/T tests
    assert!(matches!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("spa").unwrap(), LanguageCodeType::Part2T));

    // ISO 639-2/B tests
    assert!(matches!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B));
    assert!(matches!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B));

    // Whitespace and case tests
    assert!(matches!(validate_language_code(" ES ").unwrap(), LanguageCodeType::Part1));

    // Invalid codes
    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("es-MX").is_err());
}

#[test]
fn test_primary_subtag_withRegionTags_shouldStripRegion() {
    assert_eq!(primary_subtag("es-MX"), "es");
    assert_eq!(primary_subtag("pt_BR"), "pt");
    assert_eq!(primary_subtag(" EN-gb "), "en");
    assert_eq!(primary_subtag("de"), "de");
}

#[test]
fn test_normalize_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("es").unwrap(), "spa");
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");
    assert_eq!(normalize_to_part2t(" de ").unwrap(), "deu");

    assert_eq!(normalize_to_part1_or_part2t("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");

    assert!(normalize_to_part2t("zz").is_err());
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("es", "spa"));
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("fra", "fre"));
    assert!(language_codes_match("EN", "eng"));

    // Non-matches
    assert!(!language_codes_match("es", "pt"));
    assert!(!language_codes_match("en", "xyz"));
}

#[test]
fn test_get_language_name_withValidCodes_shouldReturnCorrectName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("fre").unwrap(), "French");
    assert!(get_language_name("xyz").is_err());
}

#[test]
fn test_negotiate_language_withMixedCodeForms_shouldPickSupportedLanguage() {
    let supported = vec!["en".to_string(), "es".to_string(), "de".to_string()];

    assert_eq!(negotiate_language("es-MX,en;q=0.5", &supported, "en"), "es");
    assert_eq!(negotiate_language("fr, de;q=0.7, es;q=0.9", &supported, "en"), "es");
    assert_eq!(negotiate_language("ger", &supported, "en"), "de");
    assert_eq!(negotiate_language("ja, ko", &supported, "en"), "en");
    assert_eq!(negotiate_language("", &supported, "en"), "en");
}
