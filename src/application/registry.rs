use crate::domain::model::{CredentialSlot, ServiceId, StoredApiKeys};
use crate::domain::traits::Translator;
use crate::infrastructure::config::NetworkConfig;
use crate::infrastructure::network::{DeepLTranslator, GoogleTranslator, LingvaTranslator};
use dashmap::DashMap;
use reqwest::Client;
use std::sync::Arc;

/// Registered service adapters, keyed by service id
///
/// Registering an id twice replaces the earlier adapter.
#[derive(Default)]
pub struct ProviderRegistry {
    services: DashMap<ServiceId, Arc<dyn Translator>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in adapters, sharing one HTTP client.
    pub fn with_defaults(client: Client, network: &NetworkConfig) -> Self {
        let registry = Self::new();
        registry.register(Arc::new(GoogleTranslator::new(client.clone())));
        registry.register(Arc::new(LingvaTranslator::new(
            client.clone(),
            network.lingva_url.clone(),
        )));
        registry.register(Arc::new(DeepLTranslator::new(client)));
        registry
    }

    /// Returns the adapter previously registered under the same id, if any.
    pub fn register(&self, adapter: Arc<dyn Translator>) -> Option<Arc<dyn Translator>> {
        self.services.insert(adapter.id(), adapter)
    }

    pub fn get(&self, id: ServiceId) -> Option<Arc<dyn Translator>> {
        self.services.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// All adapters, ordered by id.
    pub fn list(&self) -> Vec<Arc<dyn Translator>> {
        let mut adapters: Vec<_> = self
            .services
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        adapters.sort_by_key(|adapter| adapter.id());
        adapters
    }

    pub fn has(&self, id: ServiceId) -> bool {
        self.services.contains_key(&id)
    }

    /// Registered, and either keyless or holding a validated key.
    pub fn is_available(&self, id: ServiceId, credentials: &StoredApiKeys) -> bool {
        self.get(id)
            .is_some_and(|adapter| adapter.is_available(credentials.for_service(id)))
    }
}

/// Where a service's key lives in [`StoredApiKeys`].
pub fn credential_slot(id: ServiceId) -> Option<CredentialSlot> {
    id.credential_slot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Credential;

    fn defaults() -> ProviderRegistry {
        ProviderRegistry::with_defaults(Client::new(), &NetworkConfig::default())
    }

    #[test]
    fn defaults_cover_every_service() {
        let registry = defaults();
        let ids: Vec<_> = registry.list().iter().map(|a| a.id()).collect();
        assert_eq!(ids, ServiceId::ALL.to_vec());
    }

    #[test]
    fn keyed_services_need_a_validated_credential() {
        let registry = defaults();
        let mut keys = StoredApiKeys::default();
        assert!(registry.is_available(ServiceId::Google, &keys));
        assert!(!registry.is_available(ServiceId::DeepL, &keys));

        keys.deepl = Some(Credential::new("abc:fx"));
        assert!(!registry.is_available(ServiceId::DeepL, &keys));

        keys.deepl.as_mut().unwrap().validated = true;
        assert!(registry.is_available(ServiceId::DeepL, &keys));
    }

    #[test]
    fn slots_only_for_keyed_services() {
        assert_eq!(credential_slot(ServiceId::DeepL), Some(CredentialSlot::DeepL));
        assert_eq!(credential_slot(ServiceId::Google), None);
        assert_eq!(credential_slot(ServiceId::Lingva), None);
    }
}
