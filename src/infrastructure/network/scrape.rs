// Extraction of the translated fragment from a scraped HTML page
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on text taken from the loosest pattern; anything longer is
/// more likely page chrome than a translation.
const LOOSE_MATCH_MAX_CHARS: usize = 5000;

/// Ordered from the known page structure to progressively looser guesses.
const SCRAPE_PATTERNS: &[(&str, Option<usize>)] = &[
    // known result container
    (r#"(?s)<div[^>]*class="result-container"[^>]*>(.*?)</div>"#, None),
    // alternate class name
    (r#"(?s)<div[^>]*class="t0"[^>]*>(.*?)</div>"#, None),
    // generic result-like class
    (r#"(?s)<div[^>]*class="[^"]*result[^"]*"[^>]*>(.*?)</div>"#, None),
    // element carrying a language attribute
    (r#"(?s)<(?:div|span)[^>]*\slang="[^"]*"[^>]*>(.*?)</(?:div|span)>"#, None),
    // post-translation container
    (r#"(?s)<span[^>]*id="tw-target-text"[^>]*>(.*?)</span>"#, None),
    // any id or class mentioning a translation
    (
        r#"(?s)<[a-zA-Z][a-zA-Z0-9]*[^>]*(?:id|class)="[^"]*transl[^"]*"[^>]*>([^<]+)<"#,
        Some(LOOSE_MATCH_MAX_CHARS),
    ),
];

static PATTERNS: Lazy<Vec<(Regex, Option<usize>)>> = Lazy::new(|| {
    SCRAPE_PATTERNS
        .iter()
        .filter_map(|(pattern, max)| Regex::new(pattern).ok().map(|re| (re, *max)))
        .collect()
});

static TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]+>").ok());

/// Pull the translated text out of a result page. The first pattern that
/// yields non-empty text wins.
pub fn extract_translation(html: &str) -> Option<String> {
    PATTERNS.iter().find_map(|(pattern, max_chars)| {
        pattern.captures_iter(html).find_map(|caps| {
            let text = clean_fragment(caps.get(1)?.as_str());
            let within_bound = max_chars.map_or(true, |max| text.chars().count() <= max);
            (!text.is_empty() && within_bound).then_some(text)
        })
    })
}

fn clean_fragment(fragment: &str) -> String {
    let stripped = match TAG.as_ref() {
        Some(tag) => tag.replace_all(fragment, "").into_owned(),
        None => fragment.to_string(),
    };
    decode_entities(stripped.trim())
}

/// Decode the handful of entities translation pages actually emit.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
