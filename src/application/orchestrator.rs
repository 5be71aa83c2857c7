//! Ordered fallback across the user's enabled translation services.
//!
//! Services are tried strictly in the order the user enabled them, one at a
//! time. A failure whose kind allows fallback moves on to the next service;
//! any other failure is returned immediately. When every service fails, the
//! last service's error is returned.

use crate::application::registry::ProviderRegistry;
use crate::domain::error::{ErrorKind, TranslationError};
use crate::domain::language::resolve_with_override;
use crate::domain::model::{
    Credential, ServiceId, StoredApiKeys, TranslateRequest, TranslateResult, TranslateResultWithMeta,
    UserPreferences,
};
use crate::domain::traits::Translator;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Enabled services that are registered and usable with the stored keys, in
/// preference order. Duplicate ids are tried once.
pub fn candidate_services(
    registry: &ProviderRegistry,
    preferences: &UserPreferences,
    credentials: &StoredApiKeys,
) -> Vec<Arc<dyn Translator>> {
    let mut seen = HashSet::new();
    preferences
        .enabled_services
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .filter_map(|id| registry.get(id))
        .filter(|adapter| adapter.is_available(credentials.for_service(adapter.id())))
        .collect()
}

/// Resolve both language codes to internal codes, honouring user overrides.
pub fn normalize_request(request: &TranslateRequest, overrides: &HashMap<String, String>) -> TranslateRequest {
    TranslateRequest {
        source: resolve_with_override(&request.source, overrides),
        target: resolve_with_override(&request.target, overrides),
        ..request.clone()
    }
}

/// Fill in the stored key for one service. A tier hint already on the request
/// wins over the stored tier.
fn with_credential(request: &TranslateRequest, credential: Option<&Credential>) -> TranslateRequest {
    let mut attempt = request.clone();
    if let Some(credential) = credential {
        attempt.api_key = Some(credential.key.clone());
        attempt.tier = request.tier.or(credential.tier);
    }
    attempt
}

pub async fn translate_with_fallback(
    registry: &ProviderRegistry,
    request: &TranslateRequest,
    preferences: &UserPreferences,
    credentials: &StoredApiKeys,
) -> Result<TranslateResultWithMeta, TranslationError> {
    if preferences.enabled_services.is_empty() {
        return Err(TranslationError::no_services_enabled());
    }

    let candidates = candidate_services(registry, preferences, credentials);
    if candidates.is_empty() {
        return Err(TranslationError::no_services_available());
    }

    let request = normalize_request(request, &preferences.language_overrides);
    let mut last_error: Option<TranslationError> = None;

    for (index, adapter) in candidates.iter().enumerate() {
        let service = adapter.id();
        let attempt = with_credential(&request, credentials.for_service(service));
        debug!(%service, index, source = %attempt.source, target = %attempt.target, "trying translation service");

        match adapter.translate(&attempt).await {
            Ok(result) => {
                let used_fallback = index > 0;
                if used_fallback {
                    info!(%service, index, "translated by fallback service");
                }
                return Ok(TranslateResultWithMeta {
                    result,
                    used_fallback,
                    cached: false,
                });
            }
            Err(err) => {
                let err = err.or_service(service);
                if !err.triggers_fallback() {
                    debug!(%service, kind = %err.kind, "error is not recoverable by another service");
                    return Err(err);
                }
                warn!(%service, kind = %err.kind, error = %err, "translation service failed");
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        TranslationError::new(ErrorKind::AllServicesFailed, "All translation services failed")
    }))
}

/// Use one named service, without fallback.
pub async fn translate_direct(
    registry: &ProviderRegistry,
    service: ServiceId,
    request: &TranslateRequest,
    credentials: &StoredApiKeys,
) -> Result<TranslateResult, TranslationError> {
    let adapter = registry.get(service).ok_or_else(|| {
        TranslationError::unavailable(service, format!("Translation service {} is not registered", service))
    })?;

    let request = normalize_request(request, &HashMap::new());
    let attempt = with_credential(&request, credentials.for_service(service));
    adapter
        .translate(&attempt)
        .await
        .map_err(|err| err.or_service(service))
}

pub fn is_service_available(registry: &ProviderRegistry, service: ServiceId, credentials: &StoredApiKeys) -> bool {
    registry.is_available(service, credentials)
}
