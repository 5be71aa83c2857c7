use crate::domain::error::TranslationError;
use crate::domain::language::language_name;
use crate::domain::model::TranslateResultWithMeta;
use crate::presentation::theme::Theme;
use std::fmt::Write;

/// Render a translation for the terminal.
pub fn format_result(result: &TranslateResultWithMeta, theme: &Theme) -> String {
    let mut output = String::new();
    let service = result.result.service.definition().name;

    writeln!(output, "{}", (theme.translation)(&result.result.text)).ok();

    let mut meta = vec![(theme.service)(service)];
    if let Some(detected) = &result.result.detected_language {
        let label = language_name(detected).unwrap_or(detected.as_str());
        meta.push((theme.lang)(&format!("from {}", label)));
    }
    if result.used_fallback {
        meta.push((theme.note)("fallback"));
    }
    if result.cached {
        meta.push((theme.note)("cached"));
    }
    writeln!(output, "  {}", meta.join(" · ")).ok();

    output
}

/// Render a failure. Only the stable per-kind message is shown, never the
/// service's own error text.
pub fn format_error(error: &TranslationError, theme: &Theme) -> String {
    let mut line = (theme.error)(error.user_message());
    if let Some(service) = error.service {
        line.push_str(&format!(" ({})", (theme.service)(service.definition().name)));
    }
    line
}
