//! 错误分类测试

use omnilate::domain::error::{classify_status, ErrorKind, TranslationError};
use omnilate::domain::model::ServiceId;

#[test]
fn policy_table() {
    use ErrorKind::*;
    let table = [
        (NetworkError, true, true),
        (InvalidCredential, false, true),
        (QuotaExceeded, false, true),
        (RateLimited, true, true),
        (ServiceUnavailable, false, true),
        (InvalidLanguage, false, false),
        (TextTooLong, false, false),
        (ScrapingFailed, false, true),
        (AllServicesFailed, false, false),
    ];
    for (kind, retryable, fallback) in table {
        assert_eq!(kind.is_retryable(), retryable, "{}", kind);
        assert_eq!(kind.triggers_fallback(), fallback, "{}", kind);
        assert!(!kind.user_message().is_empty());
    }
}

#[test]
fn status_classification() {
    assert_eq!(classify_status(401, None), ErrorKind::InvalidCredential);
    assert_eq!(classify_status(403, Some(456)), ErrorKind::InvalidCredential);
    assert_eq!(classify_status(429, Some(456)), ErrorKind::RateLimited);
    assert_eq!(classify_status(456, Some(456)), ErrorKind::QuotaExceeded);
    assert_eq!(classify_status(456, None), ErrorKind::ServiceUnavailable);
    assert_eq!(classify_status(500, None), ErrorKind::ServiceUnavailable);
    assert_eq!(classify_status(404, None), ErrorKind::ServiceUnavailable);
}

#[test]
fn from_status_carries_context() {
    let err = TranslationError::from_status(ServiceId::DeepL, 456, Some(456));
    assert_eq!(err.kind, ErrorKind::QuotaExceeded);
    assert_eq!(err.service, Some(ServiceId::DeepL));
    assert_eq!(err.status, Some(456));
}

#[test]
fn or_service_keeps_existing_service() {
    let err = TranslationError::network(ServiceId::Lingva, "timed out").or_service(ServiceId::Google);
    assert_eq!(err.service, Some(ServiceId::Lingva));

    let bare = TranslationError::new(ErrorKind::NetworkError, "x").or_service(ServiceId::Google);
    assert_eq!(bare.service, Some(ServiceId::Google));
}

#[test]
fn kinds_serialize_kebab_case() {
    assert_eq!(serde_json::to_string(&ErrorKind::AllServicesFailed).unwrap(), "\"all-services-failed\"");
    assert_eq!(ErrorKind::ScrapingFailed.to_string(), "scraping-failed");
}
