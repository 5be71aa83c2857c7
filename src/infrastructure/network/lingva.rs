use crate::domain::error::TranslationError;
use crate::domain::language::{from_lingva_style, is_auto, to_lingva_style};
use crate::domain::model::{ServiceId, TranslateRequest, TranslateResult};
use crate::domain::service::ServiceDefinition;
use crate::domain::traits::Translator;
use crate::infrastructure::network::http::{classify_transport, ensure_success, preflight};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

// Lingva API Response structures
#[derive(Deserialize, Debug)]
struct LingvaResponse {
    translation: Option<String>,
    info: Option<LingvaInfo>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LingvaInfo {
    detected_source: Option<String>,
}

/// Lingva implementation (open Google Translate proxy)
pub struct LingvaTranslator {
    client: Client,
    base_url: String,
}

impl LingvaTranslator {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// `{base}/{source}/{target}/{text}`, each segment percent-encoded.
pub fn build_url(base: &str, source: &str, target: &str, text: &str) -> Result<Url, TranslationError> {
    let service = ServiceId::Lingva;
    let mut url = Url::parse(base)
        .map_err(|e| TranslationError::unavailable(service, format!("Bad Lingva URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| TranslationError::unavailable(service, format!("Bad Lingva URL {}", base)))?
        .pop_if_empty()
        .extend([source, target, text]);
    Ok(url)
}

#[async_trait]
impl Translator for LingvaTranslator {
    fn definition(&self) -> &'static ServiceDefinition {
        ServiceId::Lingva.definition()
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResult, TranslationError> {
        let service = self.id();
        preflight(self.definition(), request)?;

        let url = build_url(
            &self.base_url,
            &to_lingva_style(&request.source),
            &to_lingva_style(&request.target),
            &request.text,
        )?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport(service, &e))?;
        let body = ensure_success(service, response, None)
            .await?
            .json::<LingvaResponse>()
            .await
            .map_err(|e| classify_transport(service, &e))?;

        let text = body
            .translation
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TranslationError::unavailable(service, "Lingva response did not contain a translation"))?;

        let detected_language = if is_auto(&request.source) {
            body.info
                .and_then(|info| info.detected_source)
                .map(|code| from_lingva_style(&code))
        } else {
            None
        };

        Ok(TranslateResult {
            text,
            detected_language,
            service,
        })
    }
}
