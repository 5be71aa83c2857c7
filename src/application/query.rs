use crate::application::orchestrator::{normalize_request, translate_direct, translate_with_fallback};
use crate::domain::error::TranslationError;
use crate::domain::model::{ServiceId, TranslateRequest, TranslateResult, TranslateResultWithMeta};
use crate::infrastructure::storage::ResultCache;
use crate::state::AppState;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Use exactly this service, skipping fallback.
    pub service: Option<ServiceId>,
    /// Neither read nor write the result cache.
    pub no_cache: bool,
}

pub async fn translate_query(
    state: &AppState,
    request: &TranslateRequest,
    options: QueryOptions,
) -> Result<TranslateResultWithMeta, TranslationError> {
    let (preferences, credentials, cache_enabled) = {
        let config = state.config.read().await;
        (
            config.preferences.clone(),
            config.keys.clone(),
            config.cache.enable,
        )
    };
    let use_cache = cache_enabled && !options.no_cache;

    // Cache keys use the resolved codes the services actually receive
    let overrides = match options.service {
        Some(_) => Default::default(),
        None => preferences.language_overrides.clone(),
    };
    let normalized = normalize_request(request, &overrides);
    // Only services that could answer right now may serve cached results
    let lookup_order: Vec<ServiceId> = match options.service {
        Some(service) => vec![service],
        None => preferences.enabled_services.clone(),
    }
    .into_iter()
    .filter(|service| state.registry.is_available(*service, &credentials))
    .collect();

    // 1. Memory Cache
    if use_cache {
        for service in &lookup_order {
            let key = ResultCache::generate_key(*service, &normalized.source, &normalized.target, &normalized.text);
            if let Some(entry) = state.cache.get(&key) {
                debug!(%service, "cache hit");
                return Ok(TranslateResultWithMeta {
                    result: TranslateResult {
                        text: entry.text,
                        detected_language: entry.detected_language,
                        service: entry.service,
                    },
                    used_fallback: false,
                    cached: true,
                });
            }
        }
    }

    // 2. Online Query
    let result = match options.service {
        Some(service) => TranslateResultWithMeta {
            result: translate_direct(&state.registry, service, request, &credentials).await?,
            used_fallback: false,
            cached: false,
        },
        None => translate_with_fallback(&state.registry, request, &preferences, &credentials).await?,
    };

    // 3. Write back to cache
    if use_cache {
        let key = ResultCache::generate_key(
            result.result.service,
            &normalized.source,
            &normalized.target,
            &normalized.text,
        );
        state.cache.set(
            key,
            result.result.text.clone(),
            result.result.service,
            result.result.detected_language.clone(),
        );
    }

    Ok(result)
}
