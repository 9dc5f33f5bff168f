/*!
 * Locale negotiation.
 *
 * Resolves the active language code for a request from its
 * `Accept-Language` header and the list of languages the site supports.
 */

use log::{debug, trace};

use crate::language_utils::{language_codes_match, primary_subtag};

/// One entry of an `Accept-Language` header
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Language tag as sent by the client ("es-MX", "*")
    pub tag: String,
    /// Quality weight between 0.0 and 1.0
    pub quality: f32,
}

/// Parse an `Accept-Language` header into preferences ordered by quality.
///
/// Entries with a malformed or zero weight are dropped. Entries of equal
/// weight keep their header order.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|item| {
            let mut parts = item.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in parts {
                let param = param.trim();
                if let Some(value) = param.strip_prefix("q=") {
                    quality = match value.trim().parse::<f32>() {
                        Ok(q) if (0.0..=1.0).contains(&q) => q,
                        _ => {
                            trace!("Ignoring malformed language weight '{}'", param);
                            return None;
                        }
                    };
                }
            }

            if quality == 0.0 {
                return None;
            }

            Some(LanguagePreference {
                tag: tag.to_string(),
                quality,
            })
        })
        .collect();

    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

/// Find the supported code matching a client language tag
fn match_supported<'a>(tag: &str, supported: &'a [String]) -> Option<&'a str> {
    if let Some(exact) = supported.iter().find(|code| code.eq_ignore_ascii_case(tag)) {
        return Some(exact.as_str());
    }

    let primary = primary_subtag(tag);
    if let Some(code) = supported.iter().find(|code| primary_subtag(code) == primary) {
        return Some(code.as_str());
    }

    supported
        .iter()
        .find(|code| language_codes_match(&primary_subtag(code), &primary))
        .map(String::as_str)
}

/// Negotiate the active language for a request.
///
/// Returns the first supported language the client accepts, comparing full
/// tags before primary subtags, or `default_language` when nothing matches.
pub fn negotiate_language(accept_language: &str, supported: &[String], default_language: &str) -> String {
    for preference in parse_accept_language(accept_language) {
        if preference.tag == "*" {
            break;
        }

        if let Some(code) = match_supported(&preference.tag, supported) {
            debug!("Negotiated language '{}' from '{}'", code, preference.tag);
            return code.to_string();
        }
    }

    debug!("No accepted language supported, using '{}'", default_language);
    default_language.to_string()
}
