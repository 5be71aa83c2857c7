use crate::domain::error::TranslationError;
use crate::domain::language::to_google_style;
use crate::domain::model::{ServiceId, TranslateRequest, TranslateResult};
use crate::domain::service::{Endpoint, ServiceDefinition};
use crate::domain::traits::Translator;
use crate::infrastructure::network::http::{classify_transport, ensure_success, preflight};
use crate::infrastructure::network::scrape::extract_translation;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Google Translate implementation, scraping the mobile result page
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client) -> Self {
        let endpoint = match ServiceId::Google.definition().endpoint {
            Endpoint::Single(url) => url,
            Endpoint::Tiered { free, .. } => free,
        };
        Self::with_endpoint(client, endpoint)
    }

    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn definition(&self) -> &'static ServiceDefinition {
        ServiceId::Google.definition()
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResult, TranslationError> {
        let service = self.id();
        preflight(self.definition(), request)?;

        // `auto` is passed through literally
        let source = to_google_style(&request.source);
        let target = to_google_style(&request.target);
        let params = [
            ("sl", source.as_str()),
            ("tl", target.as_str()),
            ("q", request.text.as_str()),
            ("hl", "en"),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| classify_transport(service, &e))?;
        let response = ensure_success(service, response, None).await?;
        let html = response
            .text()
            .await
            .map_err(|e| classify_transport(service, &e))?;

        debug!(%service, bytes = html.len(), "received result page");
        let text = extract_translation(&html).ok_or_else(|| TranslationError::scraping_failed(service))?;

        Ok(TranslateResult {
            text,
            detected_language: None,
            service,
        })
    }
}
