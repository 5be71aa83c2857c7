//! Language code validation, canonicalisation and per-service wire formats.
//!
//! Internal codes are lower-case, either a bare two-letter base (`fr`) or a
//! base plus region/script (`zh-cn`). Each service has its own spelling; the
//! `to_*`/`from_*` pairs translate between the two.

use std::collections::HashMap;

pub const AUTO: &str = "auto";

/// Internal codes the services are expected to understand, with display names.
pub const SUPPORTED_CODES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("en-gb", "English (UK)"),
    ("en-us", "English (US)"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jv", "Javanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nb", "Norwegian (Bokmål)"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-br", "Portuguese (Brazil)"),
    ("pt-pt", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh-cn", "Chinese (Simplified)"),
    ("zh-tw", "Chinese (Traditional)"),
];

pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO)
}

/// `auto`, or a two-letter base optionally followed by `-` and a 2–4 letter
/// region or script subtag. Case-insensitive.
pub fn is_valid_code(code: &str) -> bool {
    if is_auto(code) {
        return true;
    }

    let letters = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
    match code.split_once('-') {
        Some((base, suffix)) => {
            base.len() == 2 && letters(base) && (2..=4).contains(&suffix.len()) && letters(suffix)
        }
        None => code.len() == 2 && letters(code),
    }
}

/// Canonical internal code. Ambiguous bare codes get a regional default.
pub fn to_internal(code: &str) -> String {
    let lower = code.trim().to_ascii_lowercase();
    match lower.as_str() {
        "zh" => "zh-cn".to_string(),
        "no" => "nb".to_string(),
        _ => lower,
    }
}

/// User overrides win verbatim; everything else goes through [`to_internal`].
pub fn resolve_with_override(code: &str, overrides: &HashMap<String, String>) -> String {
    let lower = code.trim().to_ascii_lowercase();
    match overrides.get(&lower) {
        Some(mapped) => mapped.clone(),
        None => to_internal(&lower),
    }
}

/// The primary language subtag, lower-cased (`zh_HANT` → `zh`).
pub fn base_subtag(code: &str) -> String {
    code.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

pub fn language_name(code: &str) -> Option<&'static str> {
    let internal = to_internal(code);
    SUPPORTED_CODES
        .iter()
        .find(|(c, _)| *c == internal)
        .map(|(_, name)| *name)
}

fn reverse_lookup(table: &[(&str, &'static str)], code: &str) -> String {
    table
        .iter()
        .find(|(wire, _)| wire.eq_ignore_ascii_case(code.trim()))
        .map(|(_, internal)| (*internal).to_string())
        .unwrap_or_else(|| base_subtag(code.trim()))
}

// DeepL

const DEEPL_REVERSE: &[(&str, &str)] = &[
    ("ZH-HANS", "zh-cn"),
    ("ZH-HANT", "zh-tw"),
    ("EN-US", "en-us"),
    ("EN-GB", "en-gb"),
    ("PT-BR", "pt-br"),
    ("PT-PT", "pt-pt"),
];

/// Target-language spelling: upper-case, joint script codes for Chinese.
pub fn to_deepl_style(code: &str) -> String {
    let internal = to_internal(code);
    match internal.as_str() {
        "zh-cn" | "zh-sg" | "zh-hans" => "ZH-HANS".to_string(),
        "zh-tw" | "zh-hk" | "zh-hant" => "ZH-HANT".to_string(),
        "en-us" | "en-gb" | "pt-br" | "pt-pt" => internal.to_ascii_uppercase(),
        _ => base_subtag(&internal).to_ascii_uppercase(),
    }
}

/// Source languages are accepted as bare bases only.
pub fn to_deepl_source(code: &str) -> String {
    base_subtag(&to_internal(code)).to_ascii_uppercase()
}

pub fn from_deepl_style(code: &str) -> String {
    reverse_lookup(DEEPL_REVERSE, code)
}

// Google

const GOOGLE_REVERSE: &[(&str, &str)] = &[
    ("zh-CN", "zh-cn"),
    ("zh-TW", "zh-tw"),
    ("iw", "he"),
    ("jw", "jv"),
    ("no", "nb"),
];

/// Google keeps legacy codes for Hebrew and Javanese and files Bokmål under
/// the `no` macro-language.
pub fn to_google_style(code: &str) -> String {
    if is_auto(code) {
        return AUTO.to_string();
    }
    let internal = to_internal(code);
    match internal.as_str() {
        "zh-cn" => "zh-CN".to_string(),
        "zh-tw" => "zh-TW".to_string(),
        "he" => "iw".to_string(),
        "jv" => "jw".to_string(),
        "nb" => "no".to_string(),
        _ => base_subtag(&internal),
    }
}

pub fn from_google_style(code: &str) -> String {
    reverse_lookup(GOOGLE_REVERSE, code)
}

// Lingva

const LINGVA_REVERSE: &[(&str, &str)] = &[("zh", "zh-cn"), ("zh_HANT", "zh-tw"), ("no", "nb")];

pub fn to_lingva_style(code: &str) -> String {
    if is_auto(code) {
        return AUTO.to_string();
    }
    let internal = to_internal(code);
    match internal.as_str() {
        "zh-cn" => "zh".to_string(),
        "zh-tw" => "zh_HANT".to_string(),
        "nb" => "no".to_string(),
        _ => base_subtag(&internal),
    }
}

pub fn from_lingva_style(code: &str) -> String {
    reverse_lookup(LINGVA_REVERSE, code)
}
