use crate::domain::error::{AppError, TranslationError};
use crate::domain::model::{
    Credential, CredentialValidation, ServiceId, TranslateRequest, TranslateResult,
};
use crate::domain::service::ServiceDefinition;
use async_trait::async_trait;

/// Trait for translation services
///
/// One implementation per provider. Implementations perform exactly one
/// outbound request per `translate` call and never retry internally; every
/// failure leaves the adapter already classified.
#[async_trait]
pub trait Translator: Send + Sync {
    fn definition(&self) -> &'static ServiceDefinition;

    fn id(&self) -> ServiceId {
        self.definition().id
    }

    /// Translate a request whose language codes are already internal codes
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResult, TranslationError>;

    /// Check an API key against the service. Keyless services accept anything.
    async fn validate_credential(&self, _key: &str) -> CredentialValidation {
        CredentialValidation::valid(None)
    }

    fn is_available(&self, credential: Option<&Credential>) -> bool {
        !self.definition().requires_credential || credential.is_some_and(Credential::is_usable)
    }
}

/// Trait for the volatile store holding the cache snapshot
///
/// Holds one opaque blob; expected to survive process restarts but not a
/// wipe of the user's data.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load(&self) -> Result<Option<Vec<u8>>, AppError>;

    async fn save(&self, blob: Vec<u8>) -> Result<(), AppError>;
}
