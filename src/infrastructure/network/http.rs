// HTTP client utilities shared by the service adapters
use crate::domain::error::{AppError, ErrorKind, TranslationError};
use crate::domain::language::{is_auto, is_valid_code};
use crate::domain::model::{ServiceId, TranslateRequest};
use crate::domain::service::ServiceDefinition;
use crate::infrastructure::config::NetworkConfig;
use reqwest::{Client, Proxy, Response};
use std::time::Duration;
use tracing::debug;

/// Create the shared HTTP client. The timeout applies per request, so a hung
/// service surfaces as a network error instead of stalling the fallback chain.
pub fn create_client(network: &NetworkConfig) -> Result<Client, AppError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(network.timeout_secs.max(1)))
        .user_agent(concat!("omnilate/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = network.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}

/// Classify a transport-level failure from `reqwest`.
pub fn classify_transport(service: ServiceId, err: &reqwest::Error) -> TranslationError {
    if err.is_decode() {
        return TranslationError::unavailable(
            service,
            format!("Unexpected response from {}: {}", service, err),
        );
    }
    if err.is_timeout() {
        return TranslationError::network(service, "request timed out");
    }
    match err.status() {
        Some(status) => TranslationError::from_status(service, status.as_u16(), None),
        None => TranslationError::network(service, err),
    }
}

/// Pass 2xx responses through; classify everything else. The response body is
/// only logged, never surfaced.
pub async fn ensure_success(
    service: ServiceId,
    response: Response,
    quota_status: Option<u16>,
) -> Result<Response, TranslationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(%service, status = status.as_u16(), body = %truncate(&body, 200), "service returned an error");
    Err(TranslationError::from_status(
        service,
        status.as_u16(),
        quota_status,
    ))
}

/// Checks every adapter runs before touching the network.
pub fn preflight(
    definition: &ServiceDefinition,
    request: &TranslateRequest,
) -> Result<(), TranslationError> {
    let service = definition.id;

    if !is_valid_code(&request.source) {
        return Err(TranslationError::new(
            ErrorKind::InvalidLanguage,
            format!("Invalid source language: {}", request.source),
        )
        .with_service(service));
    }
    if !is_valid_code(&request.target) || is_auto(&request.target) {
        return Err(TranslationError::new(
            ErrorKind::InvalidLanguage,
            format!("Invalid target language: {}", request.target),
        )
        .with_service(service));
    }

    if let Some(max) = definition.max_length {
        let length = request.text.chars().count();
        if length > max {
            return Err(TranslationError::new(
                ErrorKind::TextTooLong,
                format!("{} accepts at most {} characters, got {}", definition.name, max, length),
            )
            .with_service(service));
        }
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_rejects_bad_languages() {
        let def = ServiceId::Google.definition();

        let err = preflight(def, &TranslateRequest::new("hi", "english", "fr")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLanguage);
        assert_eq!(err.service, Some(ServiceId::Google));

        let err = preflight(def, &TranslateRequest::new("hi", "en", "auto")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLanguage);

        assert!(preflight(def, &TranslateRequest::new("hi", "auto", "zh-tw")).is_ok());
    }

    #[test]
    fn preflight_counts_characters_not_bytes() {
        let def = ServiceId::Lingva.definition();
        let max = def.max_length.unwrap();

        let fits = "é".repeat(max);
        assert!(preflight(def, &TranslateRequest::new(fits, "fr", "en")).is_ok());

        let too_long = "a".repeat(max + 1);
        let err = preflight(def, &TranslateRequest::new(too_long, "fr", "en")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TextTooLong);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé...");
        assert_eq!(truncate("hi", 5), "hi");
    }

    #[tokio::test]
    async fn non_success_status_is_classified() {
        use test_server::{client, serve_once};

        let (base, _) = serve_once(456, "quota").await;
        let response = client(Duration::from_secs(5)).get(&base).send().await.unwrap();
        let err = ensure_success(ServiceId::DeepL, response, Some(456)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert_eq!(err.status, Some(456));
        // provider body is not leaked into the message
        assert!(!err.message.contains("quota"));

        let (base, _) = serve_once(502, "").await;
        let response = client(Duration::from_secs(5)).get(&base).send().await.unwrap();
        let err = ensure_success(ServiceId::Google, response, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(err.service, Some(ServiceId::Google));
    }

    #[tokio::test]
    async fn success_passes_through() {
        let (base, _) = test_server::serve_once(200, "ok").await;
        let response = test_server::client(Duration::from_secs(5)).get(&base).send().await.unwrap();
        let response = ensure_success(ServiceId::Lingva, response, None).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn transport_failures_are_network_errors() {
        let refused = test_server::client(Duration::from_secs(5))
            .get(test_server::closed_port().await)
            .send()
            .await
            .unwrap_err();
        let err = classify_transport(ServiceId::Lingva, &refused);
        assert_eq!(err.kind, ErrorKind::NetworkError);
        assert_eq!(err.service, Some(ServiceId::Lingva));

        let timed_out = test_server::client(Duration::from_millis(200))
            .get(test_server::serve_silent().await)
            .send()
            .await
            .unwrap_err();
        assert!(timed_out.is_timeout());
        assert_eq!(classify_transport(ServiceId::Google, &timed_out).kind, ErrorKind::NetworkError);
    }
}
