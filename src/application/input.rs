// Raw user input → translation request
//
// Accepted forms, where the optional leading token picks the languages:
//   "hello world"        default source and target
//   "en:fr hello world"  explicit source and target
//   ":de hello"          default source, explicit target
//   "ja: こんにちは"       explicit source, default target
use crate::domain::error::AppError;
use crate::domain::language::is_valid_code;
use crate::domain::model::{TranslateRequest, UserPreferences};

/// Split a leading `src:tgt` token off the input, if there is one.
fn language_prefix(token: &str) -> Option<(Option<&str>, Option<&str>)> {
    fn side(code: &str) -> Option<Option<&str>> {
        match code {
            "" => Some(None),
            c if is_valid_code(c) => Some(Some(c)),
            _ => None,
        }
    }

    let (source, target) = token.split_once(':')?;
    let (source, target) = (side(source)?, side(target)?);
    if source.is_none() && target.is_none() {
        return None;
    }
    Some((source, target))
}

pub fn parse_input(raw: &str, preferences: &UserPreferences) -> Result<TranslateRequest, AppError> {
    let trimmed = raw.trim();
    let (prefix, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (language_prefix(first), rest.trim()),
        None => (language_prefix(trimmed), ""),
    };

    let (source, target, text) = match prefix {
        Some((source, target)) => (source, target, rest),
        None => (None, None, trimmed),
    };

    if text.is_empty() {
        return Err(AppError::Input("Nothing to translate".to_string()));
    }

    Ok(TranslateRequest::new(
        text,
        source.unwrap_or(&preferences.default_source),
        target.unwrap_or(&preferences.default_target),
    ))
}
