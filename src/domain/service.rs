// Static descriptors of the supported translation services
use crate::domain::error::{ErrorKind, TranslationError};
use crate::domain::model::{ServiceId, Tier};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    /// Scrapes a public web page.
    Native,
    /// Talks to a hosted JSON API.
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    None,
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Endpoint {
    Single(&'static str),
    Tiered {
        free: &'static str,
        pro: &'static str,
    },
}

impl Endpoint {
    pub fn for_tier(&self, tier: Tier) -> &'static str {
        match (*self, tier) {
            (Self::Single(url), _) => url,
            (Self::Tiered { free, .. }, Tier::Free) => free,
            (Self::Tiered { pro, .. }, Tier::Pro) => pro,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    pub id: ServiceId,
    pub name: &'static str,
    pub kind: IntegrationKind,
    pub requires_credential: bool,
    pub auth: AuthScheme,
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub max_length: Option<usize>,
}

pub static SERVICE_DEFINITIONS: [ServiceDefinition; 3] = [
    ServiceDefinition {
        id: ServiceId::Google,
        name: "Google Translate",
        kind: IntegrationKind::Native,
        requires_credential: false,
        auth: AuthScheme::None,
        method: HttpMethod::Get,
        endpoint: Endpoint::Single("https://translate.google.com/m"),
        max_length: Some(5000),
    },
    ServiceDefinition {
        id: ServiceId::Lingva,
        name: "Lingva Translate",
        kind: IntegrationKind::Api,
        requires_credential: false,
        auth: AuthScheme::None,
        method: HttpMethod::Get,
        endpoint: Endpoint::Single("https://lingva.ml/api/v1"),
        max_length: Some(2000),
    },
    ServiceDefinition {
        id: ServiceId::DeepL,
        name: "DeepL",
        kind: IntegrationKind::Api,
        requires_credential: true,
        auth: AuthScheme::Header,
        method: HttpMethod::Post,
        endpoint: Endpoint::Tiered {
            free: "https://api-free.deepl.com/v2",
            pro: "https://api.deepl.com/v2",
        },
        max_length: Some(5000),
    },
];

impl ServiceId {
    pub fn definition(self) -> &'static ServiceDefinition {
        match self {
            Self::Google => &SERVICE_DEFINITIONS[0],
            Self::Lingva => &SERVICE_DEFINITIONS[1],
            Self::DeepL => &SERVICE_DEFINITIONS[2],
        }
    }
}

/// Look up a descriptor by its textual identifier.
pub fn get_service_definition(id: &str) -> Result<&'static ServiceDefinition, TranslationError> {
    id.parse::<ServiceId>()
        .map(ServiceId::definition)
        .map_err(|message| TranslationError::new(ErrorKind::ServiceUnavailable, message))
}

pub fn get_all_service_definitions() -> &'static [ServiceDefinition] {
    &SERVICE_DEFINITIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_line_up_with_ids() {
        for id in ServiceId::ALL {
            assert_eq!(id.definition().id, id);
        }
    }

    #[test]
    fn unknown_definition_is_an_error() {
        let err = get_service_definition("babelfish").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(get_service_definition("DeepL").unwrap().id, ServiceId::DeepL);
    }

    #[test]
    fn tiered_endpoint_selects_by_tier() {
        let endpoint = ServiceId::DeepL.definition().endpoint;
        assert_eq!(endpoint.for_tier(Tier::Free), "https://api-free.deepl.com/v2");
        assert_eq!(endpoint.for_tier(Tier::Pro), "https://api.deepl.com/v2");
    }
}
