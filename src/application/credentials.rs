use crate::application::registry::{credential_slot, ProviderRegistry};
use crate::domain::error::{ErrorKind, TranslationError};
use crate::domain::model::{Credential, CredentialValidation, ServiceId, StoredApiKeys};
use chrono::Utc;
use tracing::{info, warn};

/// Check `key` against `service` and record the outcome in `keys`.
///
/// This is the only path that marks a stored credential as validated.
pub async fn validate_and_store(
    registry: &ProviderRegistry,
    keys: &mut StoredApiKeys,
    service: ServiceId,
    key: String,
) -> Result<CredentialValidation, TranslationError> {
    let slot = credential_slot(service).ok_or_else(|| {
        TranslationError::new(
            ErrorKind::ServiceUnavailable,
            format!("{} does not use an API key", service),
        )
        .with_service(service)
    })?;
    let adapter = registry.get(service).ok_or_else(|| {
        TranslationError::unavailable(service, format!("Translation service {} is not registered", service))
    })?;

    let validation = adapter.validate_credential(&key).await;
    info!(%service, valid = validation.valid, "credential checked");

    // A transient failure says nothing about the key itself
    let inconclusive = validation
        .error
        .as_ref()
        .is_some_and(TranslationError::is_retryable);
    if inconclusive && keys.get(slot).is_some() {
        warn!(%service, "credential check inconclusive, keeping the stored key");
        return Ok(validation);
    }

    keys.set(
        slot,
        Credential {
            key,
            tier: validation.tier,
            validated: validation.valid,
            validated_at: Some(Utc::now().timestamp()),
        },
    );

    Ok(validation)
}
