use crate::domain::error::{ErrorKind, TranslationError};
use crate::domain::language::{from_deepl_style, is_auto, to_deepl_source, to_deepl_style};
use crate::domain::model::{CredentialValidation, ServiceId, Tier, TranslateRequest, TranslateResult};
use crate::domain::service::ServiceDefinition;
use crate::domain::traits::Translator;
use crate::infrastructure::network::http::{classify_transport, ensure_success, preflight};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// DeepL answers 456 when the character quota is used up.
pub const QUOTA_EXCEEDED_STATUS: u16 = 456;

/// Keys of the free plan end in `:fx`.
const FREE_KEY_SUFFIX: &str = ":fx";

#[derive(Deserialize, Debug)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize, Debug)]
struct DeepLTranslation {
    text: String,
    detected_source_language: Option<String>,
}

pub fn infer_tier(key: &str) -> Tier {
    if key.trim().ends_with(FREE_KEY_SUFFIX) {
        Tier::Free
    } else {
        Tier::Pro
    }
}

/// An explicit hint beats what the key suffix suggests.
pub fn resolve_tier(hint: Option<Tier>, key: &str) -> Tier {
    hint.unwrap_or_else(|| infer_tier(key))
}

/// DeepL implementation (tiered commercial API)
pub struct DeepLTranslator {
    client: Client,
    free_base: String,
    pro_base: String,
}

impl DeepLTranslator {
    pub fn new(client: Client) -> Self {
        let endpoint = ServiceId::DeepL.definition().endpoint;
        Self::with_endpoints(client, endpoint.for_tier(Tier::Free), endpoint.for_tier(Tier::Pro))
    }

    pub fn with_endpoints(client: Client, free_base: impl Into<String>, pro_base: impl Into<String>) -> Self {
        Self {
            client,
            free_base: free_base.into(),
            pro_base: pro_base.into(),
        }
    }

    fn base_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Free => &self.free_base,
            Tier::Pro => &self.pro_base,
        }
    }

    fn auth_header(key: &str) -> String {
        format!("DeepL-Auth-Key {}", key.trim())
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn definition(&self) -> &'static ServiceDefinition {
        ServiceId::DeepL.definition()
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResult, TranslationError> {
        let service = self.id();
        preflight(self.definition(), request)?;

        let key = request
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                TranslationError::new(ErrorKind::InvalidCredential, "DeepL API key not configured")
                    .with_service(service)
            })?;
        let tier = resolve_tier(request.tier, key);

        let mut form = vec![
            ("text", request.text.clone()),
            ("target_lang", to_deepl_style(&request.target)),
        ];
        // auto-detect is signalled by leaving source_lang out
        if !is_auto(&request.source) {
            form.push(("source_lang", to_deepl_source(&request.source)));
        }

        debug!(%service, %tier, "sending translate request");
        let response = self
            .client
            .post(format!("{}/translate", self.base_for(tier)))
            .header("Authorization", Self::auth_header(key))
            .form(&form)
            .send()
            .await
            .map_err(|e| classify_transport(service, &e))?;
        let body = ensure_success(service, response, Some(QUOTA_EXCEEDED_STATUS))
            .await?
            .json::<DeepLResponse>()
            .await
            .map_err(|e| classify_transport(service, &e))?;

        let translation = body
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| TranslationError::unavailable(service, "DeepL returned no translations"))?;

        let detected_language = if is_auto(&request.source) {
            translation
                .detected_source_language
                .map(|code| from_deepl_style(&code))
        } else {
            None
        };

        Ok(TranslateResult {
            text: translation.text,
            detected_language,
            service,
        })
    }

    async fn validate_credential(&self, key: &str) -> CredentialValidation {
        let service = self.id();
        if key.trim().is_empty() {
            return CredentialValidation::invalid(
                TranslationError::new(ErrorKind::InvalidCredential, "DeepL API key is empty")
                    .with_service(service),
            );
        }

        let tier = infer_tier(key);
        let result = self
            .client
            .get(format!("{}/usage", self.base_for(tier)))
            .header("Authorization", Self::auth_header(key))
            .send()
            .await;

        match result {
            Ok(response) => match ensure_success(service, response, Some(QUOTA_EXCEEDED_STATUS)).await {
                Ok(_) => CredentialValidation::valid(Some(tier)),
                Err(err) => CredentialValidation::invalid(err),
            },
            Err(e) => CredentialValidation::invalid(classify_transport(service, &e)),
        }
    }
}
