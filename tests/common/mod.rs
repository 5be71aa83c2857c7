//! 测试共用的假翻译服务
#![allow(dead_code)]

use async_trait::async_trait;
use omnilate::domain::error::{ErrorKind, TranslationError};
use omnilate::domain::model::{
    Credential, CredentialValidation, ServiceId, TranslateRequest, TranslateResult,
};
use omnilate::domain::service::ServiceDefinition;
use omnilate::domain::traits::Translator;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Scripted adapter: answers every call with the same outcome and records
/// the requests it saw.
pub struct FakeTranslator {
    id: ServiceId,
    outcome: Result<String, ErrorKind>,
    available: Option<bool>,
    validation: Option<ErrorKind>,
    calls: AtomicUsize,
    requests: Mutex<Vec<TranslateRequest>>,
}

impl FakeTranslator {
    pub fn ok(id: ServiceId, text: &str) -> Arc<Self> {
        Arc::new(Self::build(id, Ok(text.to_string())))
    }

    pub fn failing(id: ServiceId, kind: ErrorKind) -> Arc<Self> {
        Arc::new(Self::build(id, Err(kind)))
    }

    /// Like [`FakeTranslator::ok`] but ignoring credential requirements.
    pub fn always_available(id: ServiceId, text: &str) -> Arc<Self> {
        let mut fake = Self::build(id, Ok(text.to_string()));
        fake.available = Some(true);
        Arc::new(fake)
    }

    /// Key checks fail with `kind`; translation itself succeeds.
    pub fn rejecting_keys(id: ServiceId, kind: ErrorKind) -> Arc<Self> {
        let mut fake = Self::build(id, Ok("x".to_string()));
        fake.validation = Some(kind);
        Arc::new(fake)
    }

    fn build(id: ServiceId, outcome: Result<String, ErrorKind>) -> Self {
        Self {
            id,
            outcome,
            available: None,
            validation: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    fn definition(&self) -> &'static ServiceDefinition {
        self.id.definition()
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResult, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match &self.outcome {
            Ok(text) => Ok(TranslateResult {
                text: text.clone(),
                detected_language: None,
                service: self.id,
            }),
            Err(kind) => Err(TranslationError::new(*kind, format!("{} scripted failure", self.id))),
        }
    }

    async fn validate_credential(&self, _key: &str) -> CredentialValidation {
        match self.validation {
            Some(kind) => CredentialValidation::invalid(
                TranslationError::new(kind, "scripted key check failure").with_service(self.id),
            ),
            None => CredentialValidation::valid(None),
        }
    }

    fn is_available(&self, credential: Option<&Credential>) -> bool {
        match self.available {
            Some(available) => available,
            None => !self.definition().requires_credential || credential.is_some_and(Credential::is_usable),
        }
    }
}
